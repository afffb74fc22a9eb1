use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine, OrderLineInput};
use crate::domain::ports::OrderRepository;
use crate::schema::{orders, orders_products, products};

use super::models::{NewOrderProductRow, NewOrderRow, OrderProductRow, OrderRow};

fn line_position(index: usize) -> Result<i32, DomainError> {
    i32::try_from(index)
        .map_err(|_| DomainError::InvalidInput(format!("too many order lines ({})", index)))
}

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(
        &self,
        customer: &Customer,
        lines: Vec<OrderLineInput>,
    ) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let order = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: Uuid::new_v4(),
                    customer_id: customer.id,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Take each line out of stock. The guard on `quantity` makes a
            //    concurrent order that got there first roll this one back.
            for line in &lines {
                let updated = diesel::update(
                    products::table
                        .filter(products::id.eq(line.product_id))
                        .filter(products::quantity.ge(line.quantity)),
                )
                .set(products::quantity.eq(products::quantity - line.quantity))
                .execute(conn)?;

                if updated == 0 {
                    let exists: bool = diesel::select(diesel::dsl::exists(
                        products::table.filter(products::id.eq(line.product_id)),
                    ))
                    .get_result(conn)?;

                    return Err(if exists {
                        DomainError::InsufficientStock {
                            product_id: line.product_id,
                            requested: line.quantity,
                        }
                    } else {
                        DomainError::ProductNotFound(line.product_id)
                    });
                }
            }

            // 3. Insert order lines, keeping request order in `position`
            let new_lines = lines
                .into_iter()
                .enumerate()
                .map(|(index, l)| {
                    Ok(NewOrderProductRow {
                        id: Uuid::new_v4(),
                        order_id: order.id,
                        product_id: l.product_id,
                        position: line_position(index)?,
                        price: l.unit_price,
                        quantity: l.quantity,
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            diesel::insert_into(orders_products::table)
                .values(&new_lines)
                .execute(conn)?;

            Ok(Order {
                id: order.id,
                customer_id: order.customer_id,
                created_at: order.created_at,
                lines: new_lines
                    .into_iter()
                    .map(|l| OrderLine {
                        id: l.id,
                        product_id: l.product_id,
                        quantity: l.quantity,
                        unit_price: l.price,
                    })
                    .collect(),
            })
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = OrderProductRow::belonging_to(&order)
            .select(OrderProductRow::as_select())
            .order(orders_products::position.asc())
            .load(&mut conn)?;

        Ok(Some(Order {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            lines: lines.into_iter().map(Into::into).collect(),
        }))
    }
}
