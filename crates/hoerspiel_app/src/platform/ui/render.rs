use std::fmt::Write;

use hoerspiel_core::{AppViewModel, CatalogRowView, FilterMode, Layout};

const TITLE_COLUMN_MAX: usize = 60;
const TABLE_HEADERS: [&str; 4] = ["Cover", "Titel", "Erschienen", "Link"];

/// Renders one view snapshot as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.heading);

    if let Some(filter) = view.filter {
        let _ = writeln!(out, "Filter: {}", filter_bar(filter));
    }
    if view.loading {
        let _ = writeln!(out, "Lädt ...");
        return out;
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{notice}");
    }
    if let Some(count) = &view.count_label {
        let _ = writeln!(out, "{count}");
    }

    if !view.rows.is_empty() {
        out.push('\n');
        render_items(&mut out, &view.rows, view.layout);
    }

    for section in &view.sections {
        out.push('\n');
        let _ = writeln!(out, "-- {} --", section.title);
        if let Some(series) = &section.series_link {
            let _ = writeln!(out, "Alle anzeigen: series {series}");
        }
        render_items(&mut out, &section.cards, view.layout);
    }

    out
}

fn filter_bar(active: FilterMode) -> String {
    FilterMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label())
            } else {
                mode.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_items(out: &mut String, rows: &[CatalogRowView], layout: Layout) {
    match layout {
        Layout::Grid => render_cards(out, rows),
        Layout::Table => render_table(out, rows),
    }
}

fn render_cards(out: &mut String, rows: &[CatalogRowView]) {
    for row in rows {
        let _ = writeln!(out, "* {}", row.title);
        let _ = writeln!(out, "  {} ({})", row.artist, row.release_year);
        if let Some(link) = &row.link {
            let _ = writeln!(out, "  {link}");
        }
    }
}

fn render_table(out: &mut String, rows: &[CatalogRowView]) {
    let title_width = rows
        .iter()
        .map(|row| row.title.chars().count())
        .chain(std::iter::once(TABLE_HEADERS[1].len()))
        .max()
        .unwrap_or(0)
        .min(TITLE_COLUMN_MAX);
    let cover_width = TABLE_HEADERS[0].len();
    let year_width = TABLE_HEADERS[2].len();

    let _ = writeln!(
        out,
        "{} | {} | {} | {}",
        pad(TABLE_HEADERS[0], cover_width),
        pad(TABLE_HEADERS[1], title_width),
        pad(TABLE_HEADERS[2], year_width),
        TABLE_HEADERS[3]
    );
    let _ = writeln!(
        out,
        "{}-+-{}-+-{}-+-{}",
        "-".repeat(cover_width),
        "-".repeat(title_width),
        "-".repeat(year_width),
        "-".repeat(TABLE_HEADERS[3].len())
    );
    for row in rows {
        let cover = if row.artwork_url.is_some() { "ja" } else { "-" };
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            pad(cover, cover_width),
            pad(&truncate(&row.title, title_width), title_width),
            pad(&row.release_year.to_string(), year_width),
            row.link.as_deref().unwrap_or("-")
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
