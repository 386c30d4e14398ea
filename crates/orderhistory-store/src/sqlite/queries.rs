use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

use orderhistory_core::{
    Error, Item, ORDER_DATE_FORMAT, Order, OrderDetail, OrderLine, OrderSummary, Result,
};

use super::db_error;

pub async fn insert_item(conn: &mut SqliteConnection, item: &Item) -> Result<()> {
    sqlx::query("insert into items (itemid, itemname, itemprice) values (?1, ?2, ?3)")
        .bind(item.id.as_str())
        .bind(item.name.as_str())
        .bind(item.price)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;
    Ok(())
}

pub async fn insert_order(conn: &mut SqliteConnection, order: &Order) -> Result<()> {
    sqlx::query("insert into orders (orderid, date, customerid, total) values (?1, ?2, ?3, ?4)")
        .bind(order.order_id)
        .bind(order.date_text())
        .bind(order.customer_id)
        .bind(order.total)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;
    Ok(())
}

pub async fn insert_line(conn: &mut SqliteConnection, line: &OrderLine) -> Result<()> {
    sqlx::query("insert into orderitems (orderid, itemid, quantity) values (?1, ?2, ?3)")
        .bind(line.order_id)
        .bind(line.item_id.as_str())
        .bind(i64::from(line.quantity))
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;
    Ok(())
}

pub async fn orders_for_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<OrderSummary>> {
    let rows = sqlx::query_as::<_, (String, i64, f64)>(
        r#"
        select date, orderid, total
        from orders
        where customerid = ?1
        order by date, orderid
        "#,
    )
    .bind(customer_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    rows.into_iter()
        .map(|(date, order_id, total)| {
            Ok(OrderSummary {
                placed_at: parse_order_date(&date)?,
                order_id,
                total,
            })
        })
        .collect()
}

pub async fn order_details(conn: &mut SqliteConnection, order_id: i64) -> Result<Vec<OrderDetail>> {
    let rows = sqlx::query_as::<_, (String, f64, i64)>(
        r#"
        select i.itemname, i.itemprice, oi.quantity
        from orderitems oi
        join items i on i.itemid = oi.itemid
        where oi.orderid = ?1
        order by oi.rowid
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(item_name, item_price, quantity)| OrderDetail {
            item_name,
            item_price,
            quantity,
        })
        .collect())
}

fn parse_order_date(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, ORDER_DATE_FORMAT)
        .map_err(|err| Error::Db(format!("invalid order date '{value}': {err}")))
}
