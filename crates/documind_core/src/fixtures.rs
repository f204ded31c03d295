//! Static tables standing in for a backend.
//!
//! Everything here is read-only. Report constructors return fresh owned values
//! so a result can be attached to state and exported without borrowing.

use crate::registry::Department;
use crate::report::{
    ComparisonReport, Contact, Difference, ExtractionReport, LabeledValue, SummaryReport,
};

pub const DEPARTMENTS: [Department; 7] = [
    Department::Sales,
    Department::Legal,
    Department::Hr,
    Department::Finance,
    Department::Operations,
    Department::Title,
    Department::General,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    RealEstate,
    Legal,
    Business,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 3] = [
        TemplateCategory::RealEstate,
        TemplateCategory::Legal,
        TemplateCategory::Business,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemplateCategory::RealEstate => "Real Estate",
            TemplateCategory::Legal => "Legal",
            TemplateCategory::Business => "Business",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TemplateCategory,
    pub fields: u32,
    pub description: &'static str,
}

const fn template(
    id: &'static str,
    name: &'static str,
    category: TemplateCategory,
    fields: u32,
    description: &'static str,
) -> Template {
    Template {
        id,
        name,
        category,
        fields,
        description,
    }
}

#[rustfmt::skip]
pub const TEMPLATES: &[Template] = &[
    template("re1", "Purchase Agreement", TemplateCategory::RealEstate, 12, "Professional template for residential property transactions."),
    template("re2", "Lease Agreement", TemplateCategory::RealEstate, 15, "Comprehensive lease agreement for rental properties."),
    template("re3", "Listing Agreement", TemplateCategory::RealEstate, 10, "Agreement between a seller and a real estate broker."),
    template("re4", "Offer to Purchase", TemplateCategory::RealEstate, 9, "Formal offer to buy a piece of real estate."),
    template("re5", "Addendum", TemplateCategory::RealEstate, 5, "Add or modify terms of an existing contract."),
    template("re6", "Closing Disclosure", TemplateCategory::RealEstate, 20, "Standardized form that details final loan terms and closing costs."),
    template("l1", "NDA", TemplateCategory::Legal, 8, "Non-Disclosure Agreement to protect confidential information."),
    template("l2", "Service Agreement", TemplateCategory::Legal, 14, "Contract between a service provider and a client."),
    template("l3", "Consulting Agreement", TemplateCategory::Legal, 11, "Defines the terms of a consulting relationship."),
    template("l4", "Cease and Desist", TemplateCategory::Legal, 7, "Formal letter demanding a stop to an illegal activity."),
    template("l5", "Power of Attorney", TemplateCategory::Legal, 10, "Grant legal authority to another person."),
    template("b1", "Employee Contract", TemplateCategory::Business, 16, "Employment agreement between an employer and employee."),
    template("b2", "Sales Agreement", TemplateCategory::Business, 12, "Contract outlining the terms of a transaction of goods."),
    template("b3", "Vendor Agreement", TemplateCategory::Business, 13, "Lays out the provisions for work performed by a vendor."),
    template("b4", "Partnership Agreement", TemplateCategory::Business, 18, "Contract that establishes a business partnership."),
    template("b5", "Invoice Template", TemplateCategory::Business, 9, "Standard invoice format for billing clients."),
];

pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

pub fn templates_in(category: TemplateCategory) -> impl Iterator<Item = &'static Template> {
    TEMPLATES.iter().filter(move |t| t.category == category)
}

/// Templates whose name contains `term`, ignoring case. An empty term matches all.
pub fn search_templates(term: &str) -> impl Iterator<Item = &'static Template> {
    let term = term.trim().to_lowercase();
    TEMPLATES
        .iter()
        .filter(move |t| t.name.to_lowercase().contains(&term))
}

/// Categories in display order with their matching templates. Categories
/// without a match are left out.
pub fn template_groups(term: &str) -> Vec<(TemplateCategory, Vec<&'static Template>)> {
    let matches: Vec<_> = search_templates(term).collect();
    TemplateCategory::ALL
        .into_iter()
        .map(|category| {
            let templates = matches
                .iter()
                .copied()
                .filter(|t| t.category == category)
                .collect::<Vec<_>>();
            (category, templates)
        })
        .filter(|(_, templates)| !templates.is_empty())
        .collect()
}

pub const INITIAL_GREETING: &str =
    "Hello! I can help you with your documents. What would you like to know?";

/// Source label attached to every non-fallback chat reply.
pub const CHAT_SOURCE_DOCUMENT: &str = "Contract_2024.pdf";

pub const DEFAULT_CONTRACT_DESCRIPTION: &str = "Create a purchase agreement for client John Smith \
for property at 123 Main St, Miami, FL. Purchase price $450,000, closing in 30 days. \
Include inspection and financing contingencies.";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn labeled(pairs: &[(&str, &str)]) -> Vec<LabeledValue> {
    pairs
        .iter()
        .map(|(label, value)| LabeledValue::new(*label, *value))
        .collect()
}

fn contact(name: &str, role: &str, phone: &str, email: &str) -> Contact {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Contact {
        name: name.to_string(),
        role: role.to_string(),
        phone: non_empty(phone),
        email: non_empty(email),
    }
}

pub fn summary_report() -> SummaryReport {
    SummaryReport {
        executive: "This Real Estate Purchase Agreement establishes terms for the sale of \
residential property at 123 Main Street, Miami, FL for $450,000 with a closing date of \
Feb 15, 2025."
            .to_string(),
        key_points: strings(&[
            "Purchase price: $450,000",
            "Earnest money deposit: $15,000",
            "30-day financing contingency",
            "10-day inspection period",
            "Property sold with all appliances",
            "Closing costs split equally",
        ]),
        dates: labeled(&[
            ("Contract Date", "January 15, 2025"),
            ("Financing Deadline", "February 14, 2025"),
            ("Inspection Deadline", "January 25, 2025"),
            ("Closing Date", "February 15, 2025"),
        ]),
        parties: vec![
            contact("John Smith", "Buyer", "813-555-0456", ""),
            contact("Jane Doe", "Seller", "305-555-0123", ""),
            contact("Miami Title Company", "Closing Agent", "", ""),
        ],
        financial: labeled(&[
            ("Total Price", "$450,000"),
            ("Down Payment", "$90,000 (20%)"),
            ("Loan Amount", "$360,000"),
            ("HOA Fees", "$150/month"),
        ]),
        action_items: strings(&[
            "Submit financing application (due 1/18)",
            "Schedule property inspection (by 1/25)",
            "Obtain homeowner's insurance quote",
            "Review HOA documents",
        ]),
    }
}

pub fn extraction_report() -> ExtractionReport {
    ExtractionReport {
        dates: labeled(&[
            ("Agreement Date", "Jan 15, 2025"),
            ("Inspection Deadline", "Jan 25, 2025"),
            ("Financing Deadline", "Feb 14, 2025"),
            ("Closing Date", "Feb 15, 2025"),
            ("Possession Date", "Feb 15, 2025"),
        ]),
        financials: labeled(&[
            ("Purchase Price", "$450,000"),
            ("Earnest Money", "$15,000"),
            ("Down Payment", "$90,000"),
            ("Loan Amount", "$360,000"),
            ("Closing Costs", "$4,500 (estimated)"),
            ("HOA Fees", "$150/month"),
            ("Property Tax", "$5,400/year"),
            ("Insurance", "$1,800/year (estimated)"),
        ]),
        contacts: vec![
            contact("John Smith", "Buyer", "(813) 555-0456", "john.smith@email.com"),
            contact("Jane Doe", "Seller", "(305) 555-0123", "jane.doe@email.com"),
            contact("Robert Johnson", "Real Estate Agent", "(305) 555-7890", ""),
        ],
        addresses: labeled(&[
            ("Property", "123 Main Street, Miami, FL 33101"),
            ("Buyer", "456 Oak Ave, Tampa, FL 33602"),
        ]),
        clauses: strings(&[
            "Financing Contingency: 30 days",
            "Inspection Contingency: 10 business days",
            "Property sold \"as-is\" after inspection",
            "All appliances included in sale",
            "Seller provides clear title",
            "Costs split equally between parties",
        ]),
    }
}

pub fn comparison_report() -> ComparisonReport {
    let difference = |item: &str, doc_a: &str, doc_b: &str, delta: &str| Difference {
        item: item.to_string(),
        doc_a: doc_a.to_string(),
        doc_b: doc_b.to_string(),
        delta: (!delta.is_empty()).then(|| delta.to_string()),
    };
    ComparisonReport {
        similarities: strings(&[
            "Both are Real Estate Purchase Agreements",
            "Same closing date: February 15, 2025",
            "Similar financing contingency (30 days)",
            "Both include inspection period",
        ]),
        differences: vec![
            difference("Purchase Price", "$450,000", "$425,000", "$25,000"),
            difference("Earnest Money", "$15,000 (3.33%)", "$10,000 (2.35%)", ""),
            difference("Inspection Period", "10 business days", "7 calendar days", ""),
        ],
        unique_to_a: strings(&[
            "Includes furniture addendum",
            "Buyer waived appraisal contingency",
            "Extended home warranty included",
        ]),
        unique_to_b: strings(&[
            "Seller financing option available",
            "60-day rent-back agreement for seller",
        ]),
        recommendations: strings(&[
            "Verify which purchase price is correct",
            "Clarify inspection timeline expectations",
            "Review furniture addendum if applicable",
            "Confirm seller financing terms if selected",
        ]),
    }
}

pub const GENERATED_CONTRACT: &str = "\
REAL ESTATE PURCHASE AGREEMENT
This Agreement is made on January 15, 2025

1. PARTIES
SELLER: Jane Doe
  Address: 789 Sunset Blvd, Miami, FL
  Phone: (305) 555-0123 | Email: jane.doe@email.com
BUYER: John Smith
  Address: 456 Oak Ave, Tampa, FL
  Phone: (813) 555-0456 | Email: john.smith@email.com

2. PROPERTY DESCRIPTION
Address: 123 Main Street, Miami, FL
Legal Description: Lot 15, Block 8, Sunshine Estates
Parcel ID: 30-4512-000-0150

3. PURCHASE PRICE
The total purchase price for the property shall be $450,000.00 (Four Hundred Fifty Thousand Dollars).

4. FINANCIAL TERMS
- Earnest Money: $15,000 (due within 3 days of execution)
- Down Payment: $90,000 (20% of purchase price)
- Loan Amount: $360,000
- Closing Costs: To be split equally between Buyer and Seller.

5. CONTINGENCIES
- Financing: 30 days from execution date to secure a loan commitment.
- Inspection: 10 business days for Buyer to conduct inspections.
- Appraisal: Property must appraise for no less than the purchase price.
- Title: Seller to provide clear and marketable title.

6. CLOSING
Closing Date: On or before February 15, 2025
Location: Miami Title Company, 555 Biscayne Blvd, Miami, FL

7. ADDITIONAL TERMS
- Property is sold \"as-is\" following the inspection period.
- All existing appliances are included in the sale.
- Seller to provide a standard termite inspection report.

8. SIGNATURES
______________________          ______________________
SELLER: Jane Doe                BUYER: John Smith
";

/// Headline figures of the analytics view.
pub const ANALYTICS_METRICS: &[(&str, &str)] = &[
    ("Documents Processed", "47"),
    ("Contracts Generated", "23"),
    ("AI Queries", "156"),
    ("Time Saved (est.)", "~18 hours"),
];

/// Template name and use count.
pub const MOST_USED_TEMPLATES: &[(&str, u32)] = &[
    ("Purchase Agreement", 12),
    ("NDA", 8),
    ("Service Agreement", 7),
];

/// Department name and share of activity in percent.
pub const DEPARTMENT_ACTIVITY: &[(&str, u8)] =
    &[("Sales", 35), ("Legal", 28), ("HR", 20), ("Other", 17)];

pub struct ProfessionalSection {
    pub title: &'static str,
    pub points: &'static [&'static str],
}

pub const PROFESSIONAL_SECTIONS: &[ProfessionalSection] = &[
    ProfessionalSection {
        title: "For Law Offices",
        points: &[
            "Review contracts in minutes, not hours",
            "Extract critical dates and obligations",
            "Generate custom agreements using vetted clause libraries",
            "Compare redlined versions instantly",
            "Prepare case summaries from depositions",
        ],
    },
    ProfessionalSection {
        title: "For Title Companies",
        points: &[
            "Analyze title documents for issues",
            "Extract property details automatically",
            "Identify liens and encumbrances",
            "Generate title commitment reports",
            "Compare current vs previous titles",
            "Create closing checklists",
        ],
    },
    ProfessionalSection {
        title: "For Realtors",
        points: &[
            "Summarize lengthy agreements for clients",
            "Extract key dates: inspections, closing",
            "Generate custom addendums quickly",
            "Compare multiple offers side-by-side",
            "Create client-ready property summaries",
        ],
    },
    ProfessionalSection {
        title: "For General Business",
        points: &[
            "Contract review and risk analysis",
            "Generate proposals from past bids",
            "Extract action items from meeting notes",
            "Compile reports from multiple sources",
            "Create NDAs, SOWs, service agreements",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ids_are_unique() {
        let mut ids: Vec<_> = TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn every_category_has_templates() {
        for category in TemplateCategory::ALL {
            assert!(templates_in(category).count() > 0, "{}", category.label());
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let names: Vec<_> = search_templates("AGREEMENT").map(|t| t.name).collect();
        assert!(names.contains(&"Purchase Agreement"));
        assert!(names.contains(&"Sales Agreement"));
        assert!(!names.contains(&"NDA"));
        assert_eq!(search_templates("").count(), TEMPLATES.len());
        assert_eq!(search_templates("  nda ").map(|t| t.id).collect::<Vec<_>>(), vec!["l1"]);
    }

    #[test]
    fn groups_skip_categories_without_matches() {
        let groups = template_groups("lease");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, TemplateCategory::RealEstate);
        assert_eq!(groups[0].1.iter().map(|t| t.id).collect::<Vec<_>>(), vec!["re2"]);

        let all = template_groups("");
        assert_eq!(
            all.iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            TemplateCategory::ALL.to_vec()
        );
        assert_eq!(all[0].1.len(), 6);
        assert!(template_groups("zzz").is_empty());
    }

    #[test]
    fn empty_contact_fields_become_none() {
        let report = summary_report();
        let agent = &report.parties[2];
        assert_eq!(agent.phone, None);
        assert_eq!(agent.email, None);
    }
}
