//! CLI command implementations

pub mod account;
pub mod catalog;
pub mod context;
pub mod init;
pub mod practice;
pub mod story;
pub mod theme;

use pearl::present::Notification;

pub(crate) fn notify(notification: &Notification) {
    println!("{}", notification);
}

/// Convert a 1-based option number typed by the user
pub(crate) fn option_index(number: usize) -> anyhow::Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Options are numbered from 1"))
}
