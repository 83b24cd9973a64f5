use crate::dataset::StudentRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub number: i64,
    pub name: String,
    pub student_id: String,
    pub remark: String,
    pub content_length: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
    pub number: i64,
    pub name: String,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub content: String,
    pub content_length: i64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub query: String,
    pub remarked_only: bool,
}

impl ViewFilter {
    pub fn new(query: impl Into<String>, remarked_only: bool) -> Self {
        Self {
            query: query.into(),
            remarked_only,
        }
    }

    /// Name matches case-insensitively; the student id only verbatim.
    fn matches(&self, name: &str, student_id: &str, remark: &str) -> bool {
        if self.remarked_only && remark.trim().is_empty() {
            return false;
        }
        let key = self.query.trim();
        if key.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&key.to_lowercase()) || student_id.contains(key)
    }

    pub fn matches_row(&self, row: &SummaryRow) -> bool {
        self.matches(&row.name, &row.student_id, &row.remark)
    }

    pub fn matches_record(&self, s: &StudentRecord) -> bool {
        self.matches(&s.name, &s.student_id, &s.remark)
    }
}

fn by_number(roster: &[StudentRecord]) -> Vec<&StudentRecord> {
    let mut ordered: Vec<&StudentRecord> = roster.iter().collect();
    ordered.sort_by_key(|s| s.number);
    ordered
}

pub fn summary_rows(roster: &[StudentRecord]) -> Vec<SummaryRow> {
    by_number(roster)
        .into_iter()
        .map(|s| SummaryRow {
            number: s.number,
            name: s.name.clone(),
            student_id: s.student_id.clone(),
            remark: s.remark.clone(),
            content_length: s.record.length,
        })
        .collect()
}

pub fn filter_rows(rows: &[SummaryRow], filter: &ViewFilter) -> Vec<SummaryRow> {
    rows.iter()
        .filter(|r| filter.matches_row(r))
        .cloned()
        .collect()
}

pub fn filtered_summary(roster: &[StudentRecord], filter: &ViewFilter) -> Vec<SummaryRow> {
    filter_rows(&summary_rows(roster), filter)
}

pub fn detail(s: &StudentRecord) -> StudentDetail {
    let remark = Some(s.remark.clone()).filter(|r| !r.is_empty());
    let mut label = format!(
        "{}. {} ({}, {} chars)",
        s.number, s.name, s.student_id, s.record.length
    );
    if let Some(r) = &remark {
        label.push_str(&format!(" • remark: {r}"));
    }
    StudentDetail {
        number: s.number,
        name: s.name.clone(),
        student_id: s.student_id.clone(),
        remark,
        content: s.record.content.clone(),
        content_length: s.record.length,
        label,
    }
}

/// Details in the same order as the summary rows.
pub fn filtered_details(roster: &[StudentRecord], filter: &ViewFilter) -> Vec<StudentDetail> {
    by_number(roster)
        .into_iter()
        .filter(|s| filter.matches_record(s))
        .map(detail)
        .collect()
}

pub fn find_detail(roster: &[StudentRecord], student_id: &str) -> Option<StudentDetail> {
    roster
        .iter()
        .find(|s| s.student_id == student_id)
        .map(detail)
}
