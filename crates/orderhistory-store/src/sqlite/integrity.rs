use std::fmt;

use serde::Serialize;
use sqlx::SqliteConnection;

use orderhistory_core::Result;

use super::db_error;

/// Row counts and constraint violations found in a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub items: i64,
    pub orders: i64,
    pub order_lines: i64,
    /// Lines whose order id has no order row.
    pub orphan_order_refs: i64,
    /// Lines whose item id has no item row.
    pub orphan_item_refs: i64,
    /// (order, item) pairs that appear on more than one line.
    pub duplicate_lines: i64,
    pub invalid_quantities: i64,
    pub empty_orders: i64,
    /// Orders whose stored total differs from the sum of their lines.
    pub total_mismatches: i64,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.orphan_order_refs == 0
            && self.orphan_item_refs == 0
            && self.duplicate_lines == 0
            && self.invalid_quantities == 0
            && self.empty_orders == 0
            && self.total_mismatches == 0
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orphan order refs={}, orphan item refs={}, duplicate lines={}, \
             invalid quantities={}, empty orders={}, total mismatches={}",
            self.orphan_order_refs,
            self.orphan_item_refs,
            self.duplicate_lines,
            self.invalid_quantities,
            self.empty_orders,
            self.total_mismatches
        )
    }
}

const COUNT_ITEMS: &str = "select count(*) from items";
const COUNT_ORDERS: &str = "select count(*) from orders";
const COUNT_LINES: &str = "select count(*) from orderitems";

const ORPHAN_ORDER_REFS: &str = r#"
    select count(*)
    from orderitems oi
    left join orders o on o.orderid = oi.orderid
    where o.orderid is null
"#;

const ORPHAN_ITEM_REFS: &str = r#"
    select count(*)
    from orderitems oi
    left join items i on i.itemid = oi.itemid
    where i.itemid is null
"#;

const DUPLICATE_LINES: &str = r#"
    select count(*)
    from (
      select orderid, itemid
      from orderitems
      group by orderid, itemid
      having count(*) > 1
    )
"#;

const INVALID_QUANTITIES: &str = "select count(*) from orderitems where quantity < 1";

const EMPTY_ORDERS: &str = r#"
    select count(*)
    from orders o
    where not exists (select 1 from orderitems oi where oi.orderid = o.orderid)
"#;

// SQLite sums lines in its own order, so totals are compared with a relative
// tolerance instead of bit equality.
const TOTAL_MISMATCHES: &str = r#"
    select count(*)
    from orders o
    left join (
      select oi.orderid, sum(i.itemprice * oi.quantity) as line_total
      from orderitems oi
      join items i on i.itemid = oi.itemid
      group by oi.orderid
    ) s on s.orderid = o.orderid
    where abs(o.total - coalesce(s.line_total, 0.0)) > 1e-9 * max(1.0, abs(o.total))
"#;

pub async fn check_integrity(conn: &mut SqliteConnection) -> Result<IntegrityReport> {
    Ok(IntegrityReport {
        items: count(conn, COUNT_ITEMS).await?,
        orders: count(conn, COUNT_ORDERS).await?,
        order_lines: count(conn, COUNT_LINES).await?,
        orphan_order_refs: count(conn, ORPHAN_ORDER_REFS).await?,
        orphan_item_refs: count(conn, ORPHAN_ITEM_REFS).await?,
        duplicate_lines: count(conn, DUPLICATE_LINES).await?,
        invalid_quantities: count(conn, INVALID_QUANTITIES).await?,
        empty_orders: count(conn, EMPTY_ORDERS).await?,
        total_mismatches: count(conn, TOTAL_MISMATCHES).await?,
    })
}

async fn count(conn: &mut SqliteConnection, sql: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error)
}
