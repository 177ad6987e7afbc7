//! Plain-text rendering of desk snapshots for the terminal front-end.

use std::fmt::Write;

use pasajes_core::edit_session::{EditMode, FormField};
use pasajes_core::filter::{filter_options, RouteFilter};
use pasajes_core::pagination::{PageView, EMPTY_PLACEHOLDER};
use pasajes_core::ticket::{FareBadge, LookupEntry, Lookups};

use crate::desk::DeskSnapshot;

const COLUMNS: [(&str, usize); 6] = [
    ("#", 4),
    ("Cliente", 28),
    ("Ruta", 24),
    ("Tipo", 14),
    ("Valor", 10),
    ("Fecha", 17),
];

/// Pad or cut `text` to exactly `width` characters.
fn cell(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}

fn badge_marker(badge: FareBadge) -> char {
    match badge {
        FareBadge::Primary => '●',
        FareBadge::Info => '◆',
        FareBadge::Secondary => '○',
    }
}

/// The visible rows, or the placeholder line when there are none.
///
/// Each row ends with the database id in brackets: that is the id the
/// `editar` and `eliminar` commands take, not the row position.
pub fn render_table(view: &PageView) -> String {
    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|(name, w)| cell(name, *w)).collect();
    let _ = writeln!(out, "{} ID", header.join(" "));

    if view.placeholder {
        let _ = writeln!(out, "  {EMPTY_PLACEHOLDER}");
        return out;
    }

    for row in &view.rows {
        let r = &row.record;
        let customer = format!("{} ({})", r.customer_name, r.customer_id);
        let route = format!("{} / {}", r.route_name, r.unit_name);
        let fare_type = format!("{} {}", badge_marker(r.fare_badge()), r.fare_type);
        let when = format!("{} {}", r.display_date(), r.time);
        let cells = [
            cell(&row.position.to_string(), COLUMNS[0].1),
            cell(&customer, COLUMNS[1].1),
            cell(&route, COLUMNS[2].1),
            cell(&fare_type, COLUMNS[3].1),
            cell(&r.display_fare(), COLUMNS[4].1),
            cell(when.trim(), COLUMNS[5].1),
        ];
        let _ = writeln!(out, "{} [{}]", cells.join(" "), r.id);
    }
    out
}

/// `« [1] 2 »` plus the record summary. Disabled arrows are shown as `-`.
pub fn render_pagination(view: &PageView) -> String {
    let mut parts = vec![if view.prev_enabled { "«" } else { "-" }.to_string()];
    parts.extend(view.links.iter().map(|link| {
        if link.active {
            format!("[{}]", link.number)
        } else {
            link.number.to_string()
        }
    }));
    parts.push(if view.next_enabled { "»" } else { "-" }.to_string());
    format!("{}    {}", parts.join(" "), view.summary())
}

fn lookup_label(entries: &[LookupEntry], id: Option<i64>) -> String {
    match id {
        None => "-- Seleccionar --".to_string(),
        Some(id) => entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| format!("{} ({id})", e.label))
            .unwrap_or_else(|| format!("#{id}")),
    }
}

/// Form title, every field with its command name, and the submit label.
pub fn render_form(snapshot: &DeskSnapshot) -> String {
    let form = &snapshot.form;
    let lookups = &snapshot.lookups;
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", snapshot.title);
    for field in FormField::ALL {
        let value = match field {
            FormField::Route => lookup_label(&lookups.routes, form.route_id),
            FormField::Unit => lookup_label(&lookups.units, form.unit_id),
            FormField::FareType => lookup_label(&lookups.fare_types, form.fare_type_id),
            other => form.get(other),
        };
        let _ = writeln!(out, "  {:<8} {value}", field.name());
    }
    let _ = write!(out, "  -> guardar: {}", snapshot.submit_label);
    if matches!(snapshot.mode, EditMode::Edit(_)) {
        out.push_str("   (cancelar para salir de la edición)");
    }
    out
}

/// Selection lists with their ids, and the filter options.
pub fn render_lookups(lookups: &Lookups, active: RouteFilter) -> String {
    let mut out = String::new();
    for (title, entries) in [
        ("Rutas", &lookups.routes),
        ("Unidades", &lookups.units),
        ("Tipos", &lookups.fare_types),
    ] {
        let _ = writeln!(out, "{title}:");
        for e in entries {
            let _ = writeln!(out, "  {:>4}  {}", e.id, e.label);
        }
    }
    let _ = writeln!(out, "Filtro:");
    let active = active.to_string();
    for option in filter_options(&lookups.routes) {
        let marker = if option.value == active { '*' } else { ' ' };
        let _ = writeln!(out, " {marker}{:>6}  {}", option.value, option.label);
    }
    out
}

/// Table, pagination bar and form for one snapshot.
pub fn render_snapshot(snapshot: &DeskSnapshot) -> String {
    format!(
        "{}{}\n\n{}",
        render_table(&snapshot.view),
        render_pagination(&snapshot.view),
        render_form(snapshot)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasajes_core::edit_session::TicketForm;
    use pasajes_core::pagination::PageState;
    use pasajes_core::ticket::TicketRecord;

    fn record(id: i64) -> TicketRecord {
        TicketRecord {
            id,
            route_name: "Quito - Ambato".into(),
            unit_name: "Bus 01".into(),
            fare_type: "Estudiante".into(),
            customer_id: "1712345678".into(),
            customer_name: "Ana Pérez".into(),
            fare_value: "3.5".into(),
            date: Some("2024-05-01T00:00:00".into()),
            time: "08:30".into(),
            observation: None,
        }
    }

    fn view(n: usize, page: usize) -> PageView {
        let records: Vec<_> = (1..=n as i64).map(|i| record(i * 100)).collect();
        let mut state = PageState::new(5);
        state.set_page(page, n);
        PageView::derive(&records, &state)
    }

    #[test]
    fn cell_pads_and_truncates() {
        assert_eq!(cell("ab", 4), "ab  ");
        assert_eq!(cell("abcdef", 4), "abc…");
        assert_eq!(cell("ñandú", 5), "ñandú");
    }

    #[test]
    fn empty_view_shows_placeholder_only() {
        let out = render_table(&view(0, 1));
        assert!(out.contains(EMPTY_PLACEHOLDER));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn rows_show_position_and_database_id() {
        let out = render_table(&view(7, 2));
        let rows: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("6 "));
        assert!(rows[0].ends_with("[600]"));
        assert!(rows[0].contains("$3.50"));
        assert!(rows[0].contains("2024-05-01 08:30"));
        assert!(rows[0].contains("◆ Estudiante"));
    }

    #[test]
    fn pagination_bar_marks_active_page_and_disabled_arrows() {
        assert_eq!(
            render_pagination(&view(7, 1)),
            "- [1] 2 »    Mostrando 5 de 7 registros"
        );
        assert_eq!(
            render_pagination(&view(7, 2)),
            "« 1 [2] -    Mostrando 2 de 7 registros"
        );
        assert_eq!(
            render_pagination(&view(0, 1)),
            "- -    Mostrando 0 de 0 registros"
        );
    }

    #[test]
    fn form_shows_selection_labels() {
        let lookups = Lookups {
            routes: vec![LookupEntry { id: 1, label: "Quito - Ambato".into() }],
            units: vec![],
            fare_types: vec![],
        };
        let snapshot = DeskSnapshot {
            view: view(0, 1),
            filter: RouteFilter::All,
            mode: EditMode::Edit(9),
            title: "Editar Pasaje #9".into(),
            submit_label: "Actualizar",
            form: TicketForm {
                route_id: Some(1),
                unit_id: Some(4),
                ..TicketForm::default()
            },
            lookups,
        };
        let out = render_form(&snapshot);
        assert!(out.starts_with("== Editar Pasaje #9 =="));
        assert!(out.contains("ruta     Quito - Ambato (1)"));
        assert!(out.contains("unidad   #4"));
        assert!(out.contains("tipo     -- Seleccionar --"));
        assert!(out.contains("guardar: Actualizar"));
        assert!(out.contains("cancelar"));
    }

    #[test]
    fn lookups_mark_active_filter() {
        let lookups = Lookups {
            routes: vec![
                LookupEntry { id: 1, label: "Quito - Ambato".into() },
                LookupEntry { id: 2, label: "Quito - Loja".into() },
            ],
            ..Lookups::default()
        };
        let out = render_lookups(&lookups, RouteFilter::Route(2));
        assert!(out.contains(" *     2  Quito - Loja"));
        assert!(out.contains("   TODAS  Ver Todas las Rutas"));
    }
}
