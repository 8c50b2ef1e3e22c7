//! Plain-text rendering of views

use std::fmt::Write;

use rust_decimal::Decimal;
use shared::models::{Product, Sale};

use crate::views::{
    FormMode, HomeMetrics, NO_TOP_SELLERS, NavLink, ProductColumn, ProductDraft, Resource,
    SaleColumn, SaleLine, SortConfig, SortDirection,
};

pub const NOT_FOUND_MESSAGE: &str = "404 - Page Not Found";

pub fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Column-aligned text table
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Render, with `empty` as the only row when there are none
    pub fn render(&self, empty: &str) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        if self.rows.is_empty() {
            out.push_str(empty);
            out.push('\n');
        }
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn header_label<C: PartialEq>(label: &str, column: C, sort: Option<SortConfig<C>>) -> String {
    match sort {
        Some(config) if config.column == column => match config.direction {
            SortDirection::Ascending => format!("{} ^", label),
            SortDirection::Descending => format!("{} v", label),
        },
        _ => label.to_string(),
    }
}

pub fn products_table(rows: &[&Product], sort: Option<SortConfig<ProductColumn>>) -> String {
    let mut table = Table::new(
        ProductColumn::ALL
            .iter()
            .map(|c| header_label(c.label(), *c, sort)),
    );
    for p in rows {
        table.push([
            p.id.to_string(),
            p.name.clone(),
            p.category_name.clone().unwrap_or_default(),
            money(p.price),
            money(p.mrp),
            p.inventory.to_string(),
            p.added_at.clone().unwrap_or_default(),
        ]);
    }
    table.render(Product::EMPTY_MESSAGE)
}

pub fn sales_table(rows: &[&Sale], sort: Option<SortConfig<SaleColumn>>) -> String {
    let mut table = Table::new(
        SaleColumn::ALL
            .iter()
            .map(|c| header_label(c.label(), *c, sort)),
    );
    for s in rows {
        table.push([
            s.id.to_string(),
            s.receipt_number.clone().unwrap_or_default(),
            s.sale_date.clone(),
            s.total_sales.map(money).unwrap_or_default(),
        ]);
    }
    table.render(Sale::EMPTY_MESSAGE)
}

pub fn home(metrics: &HomeMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Profit (last month):  PKR {}", money(metrics.total_profit));
    let _ = writeln!(out, "Total Sales (last month):   PKR {}", money(metrics.total_sales));
    let _ = writeln!(out, "Average Order Value:        PKR {}", money(metrics.average_order_value));
    out.push('\n');

    out.push_str("Top Selling Products\n");
    let mut table = Table::new(["Product", "Sold", "Stock"]);
    for seller in &metrics.top_sellers {
        table.push([
            seller.name.clone(),
            seller.quantity_sold.to_string(),
            seller.inventory.to_string(),
        ]);
    }
    out.push_str(&table.render(NO_TOP_SELLERS));
    out.push('\n');

    out.push_str("Sales Trend\n");
    let mut trend = Table::new(["Date", "Sales (PKR)"]);
    for point in &metrics.sales_trend {
        trend.push([point.label.clone(), money(point.value)]);
    }
    out.push_str(&trend.render("No sales in the last month."));
    out
}

pub fn product_form(title: &str, mode: FormMode, draft: &ProductDraft, category: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    if let FormMode::Edit(id) = mode {
        let _ = writeln!(out, "ID:           {}", id);
    }
    let _ = writeln!(out, "Name:         {}", draft.name);
    let _ = writeln!(out, "Price (PKR):  {}", draft.price);
    let _ = writeln!(out, "MRP (PKR):    {}", draft.mrp);
    let _ = writeln!(out, "Description:  {}", draft.description);
    let _ = writeln!(out, "Category:     {}", category.unwrap_or(&draft.category));
    let _ = writeln!(out, "Stock:        {}", draft.inventory);
    out
}

pub fn sale_form(title: &str, receipt: Option<&str>, date: &str, lines: &[SaleLine], total: Decimal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    if let Some(receipt) = receipt {
        let _ = writeln!(out, "Receipt: {}", receipt);
    }
    let _ = writeln!(out, "Date:    {}", date);
    out.push('\n');

    let mut table = Table::new(["#", "Product", "Price (PKR)", "Qty", "Total (PKR)"]);
    for (index, line) in lines.iter().enumerate() {
        table.push([
            (index + 1).to_string(),
            line.product_name.clone(),
            money(line.product_price),
            line.quantity.to_string(),
            money(line.line_total()),
        ]);
    }
    out.push_str(&table.render("No items."));
    let _ = writeln!(out, "Grand Total: PKR {}", money(total));
    out
}

pub fn nav(display_name: Option<&str>, links: &[NavLink]) -> String {
    let labels: Vec<&str> = links.iter().map(|link| link.label).collect();
    match display_name {
        Some(name) => format!("Smart Shop | {} | Welcome, {}", labels.join(" | "), name),
        None => format!("Smart Shop | {}", labels.join(" | ")),
    }
}
