// Prompt asset for application summarization.
// The template is data: edit the text, bump PROMPT_VERSION, leave the code alone.

use chrono::NaiveDate;

/// Version of `SUMMARY_PROMPT_TEMPLATE`. Logged with every LLM call.
pub const PROMPT_VERSION: &str = "2025-06-01";

/// Summary prompt template. Replace `{today}` and `{application_text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"You are processing a surrogacy application for Alcea Surrogacy. Extract and format a CONCISE summary - only include details that are notable or concerning. Assume healthy defaults.

CRITICAL RULES:
1. BE CONCISE - Only mention what's notable or concerning
2. Spell out ALL medical abbreviations completely (GD → Gestational Diabetes, C/S → Cesarean section, etc.)
3. Use ⚠️ emoji for concerns/flags, ⭐ for exceptional/gold star items
4. If section is clean/unremarkable, just say "Clean" or "Nothing of note"
5. Return valid JSON with formatted_summary, extracted_fields, AND is_gold_star boolean

APPLICATION DATA:
{application_text}

You must return ONLY valid JSON in this EXACT format:

{
  "formatted_summary": "THE FULL FORMATTED TEXT BELOW",
  "extracted_fields": {
    "age": <number or null>,
    "bmi": <number or null>,
    "state": "<state name or null>",
    "experienced_surrogate": "<First-time or Experienced>",
    "has_medical_flags": <true or false>,
    "has_background_flags": <true or false>,
    "has_preterm_history": <true or false>
  },
  "is_gold_star": <true or false>
}

GOLD STAR CRITERIA (all must be true):
- Age 25-38
- BMI 19-28
- At least 1 previous successful pregnancy
- No C-sections OR maximum 1 C-section
- No preterm deliveries
- No significant medical conditions
- No smoking/vaping
- Clean background
- First-time or experienced surrogate with good history

THE FORMATTED SUMMARY MUST USE THIS CONCISE TEMPLATE:

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
CANDIDATE APPLICATION SUMMARY [ADD ⭐ GOLD STAR if is_gold_star=true]
Generated: {today}
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

👤 PERSONAL
Name: [First Last] ([Preferred name if different])
Age: [##] | BMI: [##.#] | [State] | [Relationship Status] | [Employment if notable]
Experienced Surrogate: [Yes (# journeys with brief notes) / No (First-time)]

🤰 PREGNANCY HISTORY
[#] Pregnancies | [#] Deliveries | [#] Cesarean sections
Anything of note: [Only mention if there are: miscarriages, abortions, preterm deliveries, significant complications. If clean history of full-term vaginal births, just say "Clean pregnancy history"]

🏥 MEDICAL HISTORY
[If completely clean: "Clean - no medical conditions of note, non-smoker, non-vaper"]
[Otherwise list ONLY notable items with ⚠️ for concerns:
⚠️ [Condition - medication/status]
⚠️ [Smoking/vaping if applicable]
⚠️ [Dietary restrictions if notable]]

🏠 HOUSEHOLD
[Write 1-2 sentences: "[Home type] with [#] adults and [#] children (ages). [Smoke-free status]. [Pet summary if any]. [Firearm status if present and concerning]"]

👩‍⚕️ OB/GYN
Birth Control: [Type or None]
Anything of note: [ONLY mention breastfeeding if currently breastfeeding, or other concerns. Otherwise omit this line]

📋 BACKGROUND
[Either "Clean" OR briefly note concerns for self/partner]

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

MEDICAL ABBREVIATIONS TO SPELL OUT COMPLETELY:
- GD/GDM → Gestational Diabetes Mellitus
- C/S or CS → Cesarean section
- VBAC → Vaginal Birth After Cesarean
- SVD → Spontaneous Vaginal Delivery
- PE → Preeclampsia
- HELLP → Hemolysis, Elevated Liver enzymes, Low Platelet count syndrome
- PIH → Pregnancy-Induced Hypertension
- IUGR → Intrauterine Growth Restriction
- PROM → Premature Rupture of Membranes
- PPH → Postpartum Hemorrhage
- PTL → Preterm Labor
- PTD → Preterm Delivery
- D&C → Dilation and Curettage
- D&E → Dilation and Evacuation
- FT → Full-term (specify weeks)
- PT → Preterm (specify weeks)
- IUD → Intrauterine Device
- OCP → Oral Contraceptive Pills

EXTRACTED FIELDS RULES:
- age: numeric value only
- bmi: numeric value with one decimal
- state: full state name (not abbreviation)
- experienced_surrogate: "First-time" or "Experienced"
- has_medical_flags: true if ANY ⚠️ in medical section
- has_background_flags: true if any concerns in background section
- has_preterm_history: true if any preterm deliveries mentioned

Return ONLY the JSON object with no additional text."#;

/// Renders a date the way the summary header shows it, e.g. "March 7, 2025".
pub fn format_submission_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Builds the summarization prompt. Pure: the same inputs always give the same prompt.
///
/// `{today}` is substituted before `{application_text}` so that applicant text
/// containing a literal `{today}` is embedded untouched.
pub fn build_summary_prompt(application_text: &str, today: NaiveDate) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{today}", &format_submission_date(today))
        .replace("{application_text}", application_text)
}
