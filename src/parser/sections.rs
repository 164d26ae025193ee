/// Record fields a body section can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Overview,
    Symptoms,
    RiskFactors,
}

/// Heading text → field. Matched exactly and case-sensitively.
pub const SECTION_FIELDS: &[(&str, Field)] = &[
    ("Overview", Field::Overview),
    ("Symptoms", Field::Symptoms),
    ("Risk factors", Field::RiskFactors),
];

pub fn field_for(heading: &str) -> Option<Field> {
    SECTION_FIELDS
        .iter()
        .find(|(title, _)| *title == heading)
        .map(|(_, field)| *field)
}

/// An `h2` and the text of each sibling element up to the next `h2`/`h3`.
#[derive(Debug, Clone)]
pub struct Section {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

/// Raw (not yet normalized) field text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionText {
    pub overview: String,
    pub symptoms: String,
    pub risk_factors: String,
}

impl SectionText {
    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Overview => &mut self.overview,
            Field::Symptoms => &mut self.symptoms,
            Field::RiskFactors => &mut self.risk_factors,
        }
    }

    /// Every paragraph is prefixed with ", "; the normalizer strips the lead.
    pub fn append(&mut self, field: Field, paragraph: &str) {
        let slot = self.slot(field);
        slot.push_str(", ");
        slot.push_str(paragraph);
    }
}

/// Route each section's paragraphs to its field. Repeated headings accumulate;
/// unknown headings are dropped.
pub fn assign(sections: &[Section]) -> SectionText {
    let mut text = SectionText::default();
    for section in sections {
        let Some(field) = field_for(&section.heading) else {
            continue;
        };
        for paragraph in &section.paragraphs {
            text.append(field, paragraph);
        }
    }
    text
}

// ── Tests ──
