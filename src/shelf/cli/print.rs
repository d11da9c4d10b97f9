use chrono::Utc;
use colored::Colorize;
use shelf::api::{CmdMessage, MessageLevel};
use shelf::config::ShelfConfig;
use shelf::event::Event;
use shelf::model::{Address, Book};
use std::time::Duration;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_slots(slots: &[Option<Book>]) {
    if slots.is_empty() {
        println!("No books found.");
        return;
    }

    let id_width = slots.len().to_string().len();
    let title_width = slots
        .iter()
        .flatten()
        .map(|book| book.title.as_str().width())
        .max()
        .unwrap_or(0);

    for (i, slot) in slots.iter().enumerate() {
        let idx = format!("{:>width$}. ", i + 1, width = id_width);
        match slot {
            Some(book) => {
                let title = book.title.as_str();
                let padding = title_width.saturating_sub(title.width());
                println!(
                    "  {}{}{}  {}",
                    idx,
                    title.bold(),
                    " ".repeat(padding),
                    book.author.as_str().dimmed()
                );
            }
            None => println!("  {}{}", idx.dimmed(), "(removed)".red()),
        }
    }
}

pub(super) fn print_book(book: &Book) {
    println!("{} {}", book.id.to_string().yellow(), book.title.as_str().bold());
    println!("   by {}", book.author);
}

pub(super) fn print_total(total: u16) {
    println!("{}", total);
}

pub(super) fn print_storekeeper(storekeeper: &Address, caller: Option<&Address>) {
    if caller == Some(storekeeper) {
        println!("{} {}", storekeeper, "(you)".dimmed());
    } else {
        println!("{}", storekeeper);
    }
}

pub(super) fn print_config(config: &ShelfConfig) {
    for key in ShelfConfig::keys() {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

pub(super) fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events recorded.");
        return;
    }

    for event in events {
        let detail = match event {
            Event::BookAdded { title, author, .. } => format!("{} by {}", title, author),
            Event::RemovedBook { .. } => String::new(),
            Event::BookBorrowed { borrower, .. } | Event::BookReturned { borrower, .. } => {
                borrower.to_string()
            }
        };
        println!(
            "{}  {:<12} #{:<3} {}",
            format_time_ago(event.timestamp()).dimmed(),
            event.name().cyan(),
            event.book_id(),
            detail
        );
    }
}

fn format_time_ago(timestamp: u64) -> String {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    let elapsed = Duration::from_secs(now.saturating_sub(timestamp));
    let time_str = Formatter::new().convert(elapsed);
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
