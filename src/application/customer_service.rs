use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;

#[derive(Clone)]
pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_customer(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(DomainError::InvalidInput(
                "name and email are required".to_string(),
            ));
        }

        if self.repo.find_by_email(email)?.is_some() {
            return Err(DomainError::EmailInUse);
        }

        let customer = self.repo.create(NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
        })?;
        log::info!("Created customer {}", customer.id);
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::memory::InMemoryStore;

    fn service() -> CustomerService<Arc<InMemoryStore>> {
        CustomerService::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn creates_customer_with_trimmed_fields() {
        let customer = service()
            .create_customer("  Ada Lovelace ", "ada@example.com ")
            .expect("create failed");

        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.email, "ada@example.com");
    }

    #[test]
    fn rejects_duplicate_email() {
        let service = service();
        service
            .create_customer("Ada", "ada@example.com")
            .expect("first create failed");

        let err = service
            .create_customer("Someone Else", "ada@example.com")
            .unwrap_err();

        assert!(matches!(err, DomainError::EmailInUse));
    }

    #[test]
    fn rejects_blank_name() {
        let err = service().create_customer("   ", "ada@example.com").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
