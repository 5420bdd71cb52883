//! Narrative generation: the fixed content blocks and the deterministic
//! assembly of `full_analysis_text`.

use crate::analysis::PreliminaryAnalysis;
use crate::intake::IntakeSubmission;
use crate::questionnaire::Questionnaire;

/// Fixed legal disclaimer attached verbatim to every synthesis record.
pub const DISCLAIMER: &str = "This preliminary analysis is generated automatically from the \
     information you provided and does not constitute legal advice. A licensed lawyer will \
     review your case before any legal opinion is issued.";

/// Fixed next-steps paragraph.
const NEXT_STEPS: &str = "Your case will now be forwarded to a lawyer specialized in the \
     identified area. You will be notified as soon as a professional accepts the assignment. \
     Keep your documents at hand and avoid signing any new agreement related to this matter \
     until you have spoken with your lawyer.";

/// Fixed checklist of documents requested for every intake.
const REQUIRED_DOCUMENTS: &[&str] = &[
    "Government-issued identification",
    "Proof of residence",
    "Contracts, agreements, or written terms related to the dispute",
    "Receipts, invoices, or proof of payment",
    "Written communication with the opposing party (messages, emails, letters)",
];

/// Candidate rights commonly associated with a legal area.
///
/// Matching is case-insensitive on the area label; unknown areas get a
/// generic list.
pub fn candidate_rights(legal_area: &str) -> &'static [&'static str] {
    match legal_area.trim().to_lowercase().as_str() {
        "civil law" => &[
            "Specific performance or termination of the contract",
            "Compensation for material damages",
            "Compensation for moral damages where applicable",
        ],
        "consumer law" => &[
            "Repair, replacement, or refund for defective products or services",
            "Protection against abusive contract clauses",
            "Compensation for damages caused by the supplier",
        ],
        "labor law" => &[
            "Payment of outstanding wages and severance",
            "Compensation for unlawful dismissal",
            "Recognition of employment relationship and related benefits",
        ],
        "family law" => &[
            "Definition or revision of child support",
            "Regulation of custody and visitation",
            "Division of assets",
        ],
        "criminal law" => &[
            "Full legal defense at every stage of the proceeding",
            "Presumption of innocence",
            "Access to the case file through counsel",
        ],
        _ => &[
            "Assessment of contractual and statutory remedies",
            "Compensation for damages where applicable",
        ],
    }
}

/// Assemble the structured narrative for a synthesis record.
///
/// Deterministic: the same submission, analysis, and answers always
/// produce the same text. Questions are rendered in generation order.
pub fn build_full_analysis(
    submission: &IntakeSubmission,
    analysis: &PreliminaryAnalysis,
    questionnaire: &Questionnaire,
) -> String {
    let mut text = String::with_capacity(1024);

    text.push_str("## Case summary\n\n");
    text.push_str("Reported by the client:\n");
    text.push_str(&submission.case_description);
    text.push_str("\n\nPreliminary assessment:\n");
    text.push_str(&analysis.summary);
    text.push('\n');

    text.push_str("\n## Identified legal area\n\n");
    text.push_str(&format!(
        "{} (urgency: {})\n",
        analysis.legal_area, analysis.urgency
    ));

    text.push_str("\n## Intake answers\n\n");
    for question in questionnaire.questions() {
        let answer = questionnaire
            .answers()
            .get(&question.id)
            .unwrap_or("(not answered)");
        text.push_str(&format!("- {} {}\n", question.prompt, answer));
    }

    text.push_str("\n## Rights that may apply\n\n");
    for right in candidate_rights(&analysis.legal_area) {
        text.push_str(&format!("- {right}\n"));
    }

    text.push_str("\n## Documents to gather\n\n");
    for doc in REQUIRED_DOCUMENTS {
        text.push_str(&format!("- {doc}\n"));
    }

    text.push_str("\n## Next steps\n\n");
    text.push_str(NEXT_STEPS);
    text.push('\n');

    text
}
