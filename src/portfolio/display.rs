//! Console formatting for portfolio and account output

use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use super::types::Portfolio;
use crate::api::types::Account;

/// Print account identity and metadata
pub fn print_account(account: &Account) {
    println!("{}", "Account".bright_white());
    println!("{}", "─".repeat(40).bright_black());
    println!("   {} {}", "Account ID:".bright_black(), account.int_account);
    println!("   {} {}", "Username:".bright_black(), account.username);
    if let Some(name) = &account.display_name {
        println!("   {} {}", "Name:".bright_black(), name);
    }
    if let Some(email) = &account.email {
        println!("   {} {}", "Email:".bright_black(), email);
    }
}

/// Print the valued portfolio as a table with an aggregate P&L line
pub fn print_portfolio(account: &Account, portfolio: &Portfolio) {
    if portfolio.is_empty() {
        println!("{}", "No open positions.".yellow());
        return;
    }

    println!(
        "\n{}",
        format!(
            "Open positions for {} ({}):",
            account.display_name.as_deref().unwrap_or(&account.username),
            account.int_account
        )
        .bright_green()
    );
    println!("{}", "─".repeat(92).bright_black());

    // Header
    println!(
        "{:<8} {:<28} {:<14} {:>10} {:>10} {:>10} {:>12}",
        "Symbol".bright_white(),
        "Name".bright_white(),
        "ISIN".bright_white(),
        "Size".bright_white(),
        "Price".bright_white(),
        "B/E".bright_white(),
        "Unreal. P&L".bright_white(),
    );
    println!("{}", "─".repeat(92).bright_black());

    for entry in &portfolio.entries {
        let name_display = if entry.product.name.len() > 26 {
            format!("{}...", &entry.product.name[..23])
        } else {
            entry.product.name.clone()
        };

        let pnl = entry.unrealized_pnl();
        let pnl_display = if pnl >= Decimal::ZERO {
            format!("+{:.2}", pnl).bright_green().to_string()
        } else {
            format!("{:.2}", pnl).bright_red().to_string()
        };

        println!(
            "{:<8} {:<28} {:<14} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            entry.product.symbol.bright_yellow(),
            name_display,
            entry.product.isin.bright_black(),
            entry.position.size,
            entry.position.price,
            entry.position.break_even_price,
            pnl_display,
        );
    }

    println!("{}", "─".repeat(92).bright_black());

    let total = portfolio.total_unrealized_pnl();
    let total_display = if total >= Decimal::ZERO {
        format!("+{:.2}", total).bright_green().to_string()
    } else {
        format!("{:.2}", total).bright_red().to_string()
    };
    println!(
        "{} positions | {} {}",
        portfolio.len(),
        "Total unrealized P&L:".bright_white(),
        total_display
    );
}
