use std::fmt::Write as _;

use chrono::NaiveDateTime;
use documind_core::fixtures;
use documind_core::{
    ActionResult, ActiveView, AppViewModel, ChatMessage, ComparisonReport, Contact,
    ExtractionReport, LabeledValue, NotificationKind, Overlay, ResultPayload, Sender,
    SummaryReport,
};

const RULE: &str = "------------------------------------------------------------------------";

/// Renders the whole screen as text. `now` drives the relative upload times.
pub fn render(view: &AppViewModel, now: NaiveDateTime) -> String {
    let mut out = String::new();
    header(&mut out, view);

    match view.active_view {
        ActiveView::Documents => documents_view(&mut out, view, now),
        ActiveView::Templates => templates_view(&mut out, &view.template_search),
        ActiveView::Generate => generate_view(&mut out, view),
        ActiveView::Analytics => analytics_view(&mut out),
        ActiveView::Info => info_view(&mut out),
    }

    if let Some(overlay) = &view.overlay {
        overlay_panel(&mut out, view, overlay, now);
    }
    if view.chat_visible {
        chat_panel(&mut out, view);
    }
    if let Some(notification) = &view.notification {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", notification.message);
    }
    out
}

fn header(out: &mut String, view: &AppViewModel) {
    let tabs: Vec<String> = ActiveView::ALL
        .iter()
        .map(|v| {
            if *v == view.active_view {
                format!("[{}]", v.label())
            } else {
                v.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "DocuMind AI | {} | Dept: {}",
        tabs.join("  "),
        view.department
    );
    let _ = writeln!(out, "{RULE}");
}

fn documents_view(out: &mut String, view: &AppViewModel, now: NaiveDateTime) {
    let _ = writeln!(
        out,
        "Documents ({}, {} selected)",
        view.documents.len(),
        view.selected_count
    );
    if view.documents.is_empty() {
        let _ = writeln!(out, "  No documents yet. Use 'upload <path>' to add some.");
    }
    for (index, row) in view.documents.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. [{}] {}  {} | {} | {}",
            index + 1,
            if row.selected { 'x' } else { ' ' },
            row.name,
            format_file_size(row.size_bytes),
            row.department,
            time_ago(row.uploaded_at, now)
        );
    }

    let flag = |on: bool, name: &str| if on { name.to_string() } else { format!("({name})") };
    let _ = writeln!(
        out,
        "Actions: {}  {}  {}",
        flag(view.actions.summarize, "summarize"),
        flag(view.actions.extract, "extract"),
        flag(view.actions.compare, "compare")
    );
    if view.processing {
        let _ = writeln!(out, "Processing...");
    }
    if let Some(result) = &view.result {
        result_panel(out, result);
    }
}

fn result_panel(out: &mut String, result: &ActionResult) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}  (dismiss to close, export to save)", result.title);
    let _ = writeln!(out, "Sources: {}", result.source_documents.join(", "));
    match &result.payload {
        ResultPayload::Summary(report) => summary(out, report),
        ResultPayload::Extraction(report) => extraction(out, report),
        ResultPayload::Comparison(report) => comparison(out, report),
    }
}

fn summary(out: &mut String, report: &SummaryReport) {
    let _ = writeln!(out, "{}", report.executive);
    bullets(out, "Key points", &report.key_points);
    labeled(out, "Important dates", &report.dates);
    contacts(out, "Parties", &report.parties);
    labeled(out, "Financial terms", &report.financial);
    bullets(out, "Action items", &report.action_items);
}

fn extraction(out: &mut String, report: &ExtractionReport) {
    labeled(out, "Dates", &report.dates);
    labeled(out, "Financial figures", &report.financials);
    contacts(out, "Contacts", &report.contacts);
    labeled(out, "Addresses", &report.addresses);
    bullets(out, "Key clauses", &report.clauses);
}

fn comparison(out: &mut String, report: &ComparisonReport) {
    bullets(out, "Similarities", &report.similarities);
    let _ = writeln!(out, "Differences:");
    for diff in &report.differences {
        let _ = write!(out, "  - {}: {} vs {}", diff.item, diff.doc_a, diff.doc_b);
        match &diff.delta {
            Some(delta) => {
                let _ = writeln!(out, " ({delta})");
            }
            None => out.push('\n'),
        }
    }
    bullets(out, "Only in first document", &report.unique_to_a);
    bullets(out, "Only in second document", &report.unique_to_b);
    bullets(out, "Recommendations", &report.recommendations);
}

fn bullets(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn labeled(out: &mut String, title: &str, items: &[LabeledValue]) {
    let _ = writeln!(out, "{title}:");
    for item in items {
        let _ = writeln!(out, "  - {}: {}", item.label, item.value);
    }
}

fn contacts(out: &mut String, title: &str, items: &[Contact]) {
    let _ = writeln!(out, "{title}:");
    for contact in items {
        let _ = write!(out, "  - {} ({})", contact.name, contact.role);
        for detail in [&contact.phone, &contact.email].into_iter().flatten() {
            let _ = write!(out, " {detail}");
        }
        out.push('\n');
    }
}

fn templates_view(out: &mut String, search: &str) {
    let _ = writeln!(out, "Template Library");
    if !search.trim().is_empty() {
        let _ = writeln!(out, "Search: {}", search.trim());
    }
    let groups = fixtures::template_groups(search);
    if groups.is_empty() {
        let _ = writeln!(out, "  No templates match.");
    }
    for (category, templates) in groups {
        let _ = writeln!(out, "{} ({} templates)", category.label(), templates.len());
        for template in templates {
            let _ = writeln!(
                out,
                "  {:<4} {} ({} fields) - {}",
                template.id, template.name, template.fields, template.description
            );
        }
    }
    let _ = writeln!(out, "'preview <id>' for details, 'use <id>' to start a contract.");
}

fn generate_view(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(out, "Generate Contract");
    let template = view
        .generator_template
        .as_deref()
        .and_then(fixtures::find_template);
    match template {
        Some(t) => {
            let _ = writeln!(out, "Template: {} ({})", t.name, t.id);
        }
        None => {
            let _ = writeln!(out, "Template: none selected");
        }
    }
    let _ = writeln!(out, "Default requirements: {}", fixtures::DEFAULT_CONTRACT_DESCRIPTION);
    if !view.documents.is_empty() {
        let names: Vec<String> = view
            .documents
            .iter()
            .enumerate()
            .map(|(i, d)| format!("{}={}", i + 1, d.name))
            .collect();
        let _ = writeln!(out, "Reference documents: {}", names.join(", "));
    }
    if !view.actions.generate {
        let _ = writeln!(out, "Processing...");
    }
    let _ = writeln!(out, "generate <template|-> [docs=1,2] [description...]");
}

fn analytics_view(out: &mut String) {
    let _ = writeln!(out, "Analytics");
    for (label, value) in fixtures::ANALYTICS_METRICS {
        let _ = writeln!(out, "  {label:<22} {value}");
    }
    let _ = writeln!(out, "Most used templates:");
    for (rank, (name, uses)) in fixtures::MOST_USED_TEMPLATES.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} - {} uses", rank + 1, name, uses);
    }
    let _ = writeln!(out, "Department activity:");
    for (name, percent) in fixtures::DEPARTMENT_ACTIVITY {
        let bar = "#".repeat(usize::from(*percent) / 5);
        let _ = writeln!(out, "  {name:<8} {bar:<20} {percent}%");
    }
}

fn info_view(out: &mut String) {
    let _ = writeln!(out, "How DocuMind AI Helps");
    for section in fixtures::PROFESSIONAL_SECTIONS {
        let _ = writeln!(out, "{}:", section.title);
        for point in section.points {
            let _ = writeln!(out, "  - {point}");
        }
    }
}

fn overlay_panel(out: &mut String, view: &AppViewModel, overlay: &Overlay, now: NaiveDateTime) {
    let _ = writeln!(out, "{RULE}");
    match overlay {
        Overlay::ViewDocument(id) => {
            if let Some(row) = view.documents.iter().find(|d| &d.id == id) {
                let _ = writeln!(out, "Document: {}", row.name);
                let _ = writeln!(out, "  Type: {}", row.mime_type);
                let _ = writeln!(out, "  Size: {}", format_file_size(row.size_bytes));
                let _ = writeln!(out, "  Department: {}", row.department);
                let _ = writeln!(out, "  Uploaded: {}", time_ago(row.uploaded_at, now));
                let _ = writeln!(out, "  Preview is not available in this simulation.");
            }
        }
        Overlay::PreviewTemplate(id) => {
            if let Some(t) = fixtures::find_template(id) {
                let _ = writeln!(out, "Template: {} [{}]", t.name, t.category.label());
                let _ = writeln!(out, "  {}", t.description);
                let _ = writeln!(out, "  {} fields. 'use {}' to fill it in.", t.fields, t.id);
            }
        }
        Overlay::GeneratedContract(contract) => {
            let name = contract.template_name.as_deref().unwrap_or(&contract.template_id);
            let _ = writeln!(out, "Generated contract ({name})");
            if !contract.source_documents.is_empty() {
                let _ = writeln!(out, "References: {}", contract.source_documents.join(", "));
            }
            let _ = writeln!(out, "{}", contract.content.trim_end());
            let _ = writeln!(out, "'export <path>' saves the contract text.");
        }
    }
    let _ = writeln!(out, "('close' to dismiss)");
}

fn chat_panel(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "AI Assistant");
    for message in &view.chat {
        chat_line(out, message);
    }
    if view.queued_messages > 0 {
        let _ = writeln!(out, "  ({} question(s) waiting)", view.queued_messages);
    }
    let _ = writeln!(out, "{RULE}");
}

fn chat_line(out: &mut String, message: &ChatMessage) {
    if message.is_placeholder {
        let _ = writeln!(out, "        Assistant is typing...");
        return;
    }
    let who = match message.sender {
        Sender::User => "You",
        Sender::Assistant => "Assistant",
    };
    let _ = write!(out, "  {:>5} {}: {}", message.time_label, who, message.text);
    if let Some(source) = &message.source {
        let _ = write!(out, " [source: {source}]");
    }
    out.push('\n');
}

/// Size with up to two decimals in the largest fitting 1024-based unit.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Coarse "N units ago" label; a unit is used once more than one of it has passed.
pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - then).num_seconds().max(0);
    const STEPS: [(i64, &str); 5] = [
        (31_536_000, "years"),
        (2_592_000, "months"),
        (86_400, "days"),
        (3_600, "hours"),
        (60, "minutes"),
    ];
    for (size, unit) in STEPS {
        if seconds > size {
            return format!("{} {unit} ago", seconds / size);
        }
    }
    format!("{seconds} seconds ago")
}
