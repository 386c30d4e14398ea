use sqlx::SqliteConnection;

use orderhistory_core::Result;

use super::db_error;

const CREATE_ITEMS: &str = r#"
    create table items (
      itemid text primary key,
      itemname text not null,
      itemprice real not null
    )
"#;

const CREATE_ORDERS: &str = r#"
    create table orders (
      orderid integer primary key,
      date text not null,
      customerid integer not null,
      total real not null
    )
"#;

const CREATE_ORDER_ITEMS: &str = r#"
    create table orderitems (
      orderid integer not null references orders(orderid),
      itemid text not null references items(itemid),
      quantity integer not null check (quantity >= 1),
      primary key (orderid, itemid)
    )
"#;

/// Create the three tables. Fails if any of them already exists.
pub async fn create_schema(conn: &mut SqliteConnection) -> Result<()> {
    for statement in [CREATE_ITEMS, CREATE_ORDERS, CREATE_ORDER_ITEMS] {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?;
    }
    Ok(())
}
