//! Interactive order browser over a generated store.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;

use orderhistory_core::{OrderDetail, OrderSummary};
use orderhistory_store::OrderStore;

use crate::error::CliError;

const MENU: &str = "\n1. All orders\n2. Order details\n3. Quit\n\nEnter selection --> ";
const ORDERS_RULE: &str = "---------------------------------------------";
const DETAILS_RULE: &str = "-------------------------------------------";

/// Run the menu loop until the user quits or input ends.
pub async fn run_browser<R: BufRead, W: Write>(
    store: &OrderStore,
    mut input: R,
    output: &mut W,
) -> Result<(), CliError> {
    loop {
        write!(output, "{MENU}")?;
        output.flush()?;
        let Some(choice) = read_line(&mut input)? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(customer_id) = prompt_id(&mut input, output, "customer")? else {
                    return Ok(());
                };
                if let Some(customer_id) = customer_id {
                    let orders = store.orders_for_customer(customer_id).await?;
                    write!(output, "{}", render_orders(&orders))?;
                }
            }
            "2" => {
                let Some(order_id) = prompt_id(&mut input, output, "order")? else {
                    return Ok(());
                };
                if let Some(order_id) = order_id {
                    let details = store.order_details(order_id).await?;
                    write!(output, "{}", render_order_details(&details))?;
                }
            }
            "3" => return Ok(()),
            _ => writeln!(output, "Invalid selection, try again.")?,
        }
    }
}

/// Outer `None` means input ended; inner `None` means the id did not parse.
fn prompt_id<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<Option<Option<i64>>> {
    write!(output, "\nEnter {label} ID --> ")?;
    output.flush()?;
    let Some(raw) = read_line(input)? else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(id) => Ok(Some(Some(id))),
        Err(_) => {
            writeln!(output, "Invalid {label} ID, try again.")?;
            Ok(Some(None))
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn render_orders(orders: &[OrderSummary]) -> String {
    let mut out = format!("\n{:<30}{:<10}{:<10}\n{ORDERS_RULE}\n", "Date", "Order ID", "Total");
    for order in orders {
        out.push_str(&format!(
            "{:<30}{:<10}{:<10}\n",
            format_order_date(&order.placed_at),
            order.order_id,
            format_money(order.total)
        ));
    }
    out
}

pub fn render_order_details(details: &[OrderDetail]) -> String {
    let mut out = format!("\n{:<20}{:<10}{:<10}\n{DETAILS_RULE}\n", "Item", "Price", "Quantity");
    for detail in details {
        out.push_str(&format!(
            "{:<20}{:<10}{:<10}\n",
            detail.item_name,
            format_money(detail.item_price),
            detail.quantity
        ));
    }
    out
}

/// `June 20, 2010 9:30 AM`
pub fn format_order_date(placed_at: &NaiveDateTime) -> String {
    placed_at.format("%B %-d, %Y %-I:%M %p").to_string()
}

/// US currency with thousands separators, e.g. `$1,234.50`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
