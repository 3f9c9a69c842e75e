//! Local mock annotation generator
//!
//! Produces canned nuance payloads for demo builds and tests when the
//! analysis backend is not reachable.

use uuid::Uuid;

use super::types::{Annotation, NuanceData};

pub const MOCK_SCAN_ID: &str = "mock-scan-id";
pub const MOCK_OCR_RESULT_ID: &str = "mock-ocr-result-id";
pub const MOCK_MODEL: &str = "gemini-1.5-flash";
pub const MOCK_PROMPT_VERSION: &str = "1.0";

struct MockNuance {
    context: &'static str,
    meaning: &'static str,
    usage_example: &'static str,
    usage_timing: &'static str,
    word_breakdown: &'static str,
    alternative_meaning: &'static str,
}

static MONTHLY_REPORT: MockNuance = MockNuance {
    context: "This phrase appears in a monthly report email to a manager discussing KPI movements and performance trends.",
    meaning: "This month, CVR (Conversion Rate) has improved by +1.2 percentage points compared to last month, indicating better quality of incoming traffic.",
    usage_example: "今月はCVRが前月比+1.2pt改善し、流入品質の向上が示唆されます。",
    usage_timing: "Use when reporting KPI movements in monthly or quarterly summaries. Appropriate for professional email updates to managers or stakeholders.",
    word_breakdown: "• 今月 (こんげつ): this month\n• は: topic marker\n• 前月比 (ぜんげつひ): compared to last month\n• 改善 (かいぜん): improvement\n• 示唆される (しさされる): to be indicated/suggested",
    alternative_meaning: "In analytics contexts, 'pt' typically refers to 'percentage points' rather than just 'points'. In finance, this phrasing could also apply to interest rate changes.",
};

static GREETING: MockNuance = MockNuance {
    context: "This phrase appears at the beginning of a formal business email in Japanese correspondence.",
    meaning: "I hope this email finds you well and that you are having a productive day.",
    usage_example: "お忙しい中申し訳ありませんが、本件につきましてご検討いただけますと幸いです。",
    usage_timing: "Use in formal Japanese business emails when making a request. This shows politeness and respect for the recipient's time.",
    word_breakdown: "• お忙しい中 (お忙しいなか): while busy\n• 申し訳ありません: I'm sorry/excuse me\n• 本件 (ほんけん): this matter\n• ご検討 (ごけんとう): consideration\n• 幸いです: would be appreciated",
    alternative_meaning: "This phrase can also be used to politely introduce a sensitive topic or make a request that may inconvenience the recipient.",
};

static CONCLUSION: MockNuance = MockNuance {
    context: "This phrase appears at the end of a business proposal or project summary document.",
    meaning: "We look forward to your favorable consideration and hope to have the opportunity to work together.",
    usage_example: "ご検討のほど、何卒よろしくお願い申し上げます。",
    usage_timing: "Use at the conclusion of formal business proposals, quotations, or partnership proposals. Common in Japanese business correspondence.",
    word_breakdown: "• ご検討 (ごけんとう): consideration\n• のほど: approximately/roughly (polite emphasis)\n• 何卒 (なにとぞ): please (formal)\n• よろしくお願い申し上げます: humbly request your favor",
    alternative_meaning: "Similar expressions include ご査収ください (please review) or ご確認お願いします (please confirm), but this is more general and polite.",
};

fn pick(selected_text: &str) -> &'static MockNuance {
    let normalized = selected_text.trim().to_lowercase();

    // Month keywords are checked first
    if normalized.contains("ヶ月") || normalized.contains('月') {
        &MONTHLY_REPORT
    } else if normalized.contains("忙しい") || normalized.contains("申し訳") {
        &GREETING
    } else if normalized.contains("検討") || normalized.contains("ようお願い") {
        &CONCLUSION
    } else {
        &MONTHLY_REPORT
    }
}

/// Synthesize an annotation for `selected_text` with a fresh UUID
pub fn mock_annotation(selected_text: &str) -> Annotation {
    let mock = pick(selected_text);

    Annotation::new(
        Uuid::new_v4().to_string(),
        MOCK_SCAN_ID,
        selected_text,
        NuanceData {
            meaning: mock.meaning.to_string(),
            usage_example: mock.usage_example.to_string(),
            usage_timing: mock.usage_timing.to_string(),
            word_breakdown: mock.word_breakdown.to_string(),
            alternative_meaning: mock.alternative_meaning.to_string(),
        },
    )
    .with_context(mock.context)
    .with_ocr_result(MOCK_OCR_RESULT_ID)
    .with_model(MOCK_MODEL, MOCK_PROMPT_VERSION)
}
