//! Terminal rendering for listings and session info.
//! Plain ASCII tables, capped to the detected terminal width.

use terminal_size::{Width, terminal_size};

use crate::error::ApiError;
use crate::model::{Apartment, Identity};

const FALLBACK_WIDTH: usize = 120;

fn term_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => w as usize,
        None => FALLBACK_WIDTH,
    }
}

/// Render the (already filtered) page window as a table.
pub fn print_apartments(items: &[Apartment]) {
    if items.is_empty() {
        println!("no apartments to show");
        return;
    }

    let headers = ["slug", "name", "rooms", "m2", "price", "status"];
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(items.len());
    for a in items {
        rows.push(vec![
            a.slug.clone(),
            a.name.clone(),
            a.number_of_rooms.to_string(),
            a.square.clone(),
            a.price.clone(),
            if a.availability { "available".to_string() } else { "taken".to_string() },
        ]);
    }

    // Column widths from content, then squeezed into the terminal if needed.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_len(cell));
        }
    }
    squeeze(&mut widths, term_width());

    let sep = build_separator(&widths);
    println!("{sep}");
    println!("{}", build_row(&headers.map(String::from), &widths));
    println!("{sep}");
    for row in &rows {
        println!("{}", build_row(row, &widths));
    }
    println!("{sep}");
}

pub fn print_detail(a: &Apartment) {
    println!("{} ({})", a.name, a.slug);
    println!("  {}", a.description);
    println!("  rooms: {}, square: {} m2, price: {}", a.number_of_rooms, a.square, a.price);
    println!("  status: {}", if a.availability { "available" } else { "taken" });
    if !a.owner_email.is_empty() {
        println!("  owner: {}", a.owner_email);
    }
    println!("  listed: {}", a.created_at.format("%Y-%m-%d %H:%M"));
}

pub fn print_identity(identity: &Identity) {
    let verified = if identity.is_verified { "verified" } else { "not verified" };
    println!("{} <{}> ({verified})", identity.display_name(), identity.email);
}

/// Field-level error breakdown for rejected writes; everything else is a
/// one-liner.
pub fn print_api_error(e: &ApiError) {
    match e {
        ApiError::Validation { fields } => {
            eprintln!("rejected by the server:");
            for (field, messages) in fields {
                eprintln!("  {field}: {}", messages.join("; "));
            }
        }
        other => eprintln!("error: {other}"),
    }
}

fn display_len(s: &str) -> usize {
    s.chars().count()
}

/// Shrink the widest columns until the full row fits the terminal.
fn squeeze(widths: &mut [usize], term: usize) {
    const MIN_COL: usize = 6;
    // borders: "| " + " | " per column + " |"
    let overhead = 3 * widths.len() + 1;
    let mut total = widths.iter().sum::<usize>() + overhead;
    while total > term {
        let Some((idx, w)) = widths.iter().copied().enumerate().max_by_key(|(_, w)| *w) else {
            return;
        };
        if w <= MIN_COL {
            return;
        }
        widths[idx] = w - 1;
        total -= 1;
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or_default();
        let text = truncate(cell, *w);
        let pad = w.saturating_sub(display_len(&text));
        s.push(' ');
        s.push_str(&text);
        s.push_str(&" ".repeat(pad));
        s.push(' ');
        s.push('|');
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if display_len(s) <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "…".to_string();
    }
    s.chars().take(max - 1).collect::<String>() + "…"
}
