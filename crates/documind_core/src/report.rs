use serde::Serialize;

/// A titled value such as "Closing Date: February 15, 2025".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub executive: String,
    pub key_points: Vec<String>,
    pub dates: Vec<LabeledValue>,
    pub parties: Vec<Contact>,
    pub financial: Vec<LabeledValue>,
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Label is the context the date was found in.
    pub dates: Vec<LabeledValue>,
    pub financials: Vec<LabeledValue>,
    pub contacts: Vec<Contact>,
    pub addresses: Vec<LabeledValue>,
    pub clauses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub item: String,
    pub doc_a: String,
    pub doc_b: String,
    pub delta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub similarities: Vec<String>,
    pub differences: Vec<Difference>,
    pub unique_to_a: Vec<String>,
    pub unique_to_b: Vec<String>,
    pub recommendations: Vec<String>,
}
