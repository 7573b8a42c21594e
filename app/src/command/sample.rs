//! Bundled demonstration texts for trying the extractor.

use anyhow::bail;

const HEALTHCARE_SAMPLES: &[&str] = &[
    "Patient John Doe was admitted to General Hospital on March 15, 2024, with complaints \
     of chest pain and shortness of breath. He was diagnosed with acute myocardial \
     infarction and started on aspirin 81mg daily and metoprolol 25mg twice daily. Blood \
     tests showed elevated troponin levels. The patient underwent cardiac catheterization \
     and was discharged on March 20, 2024, with instructions for follow-up in cardiology \
     clinic.",
    "Mrs. Sarah Johnson, a 65-year-old female, presented to the emergency room with severe \
     abdominal pain. CT scan revealed appendicitis. She underwent emergency appendectomy \
     on April 3, 2024. Post-operative recovery was uncomplicated. She was prescribed \
     ibuprofen 400mg for pain management and discharged home the following day.",
    "The patient was diagnosed with Type 2 diabetes mellitus during routine screening. \
     HbA1c was 8.2%. Started on metformin 500mg twice daily. Patient education on diet \
     and exercise was provided. Follow-up appointment scheduled in 3 months to monitor \
     blood glucose levels and medication effectiveness.",
];

const FINANCE_SAMPLES: &[&str] = &[
    "Acme Corp acquired Beta Industries Ltd for 3.5 billion dollars on March 3, 2024. The \
     deal was announced after markets closed, and Acme shares rose sharply. Analysts \
     valued the combined company at 12 billion dollars.",
    "Nova Technologies Inc went public on June 10, 2024, raising 500 million dollars in \
     its initial public offering. Retail investors transferred 250,000 dollars on average \
     into brokerage accounts ahead of the listing, and the stock closed higher.",
];

pub fn run(domain: &str, index: usize) -> anyhow::Result<()> {
    let samples = match domain {
        "healthcare" => HEALTHCARE_SAMPLES,
        "finance" => FINANCE_SAMPLES,
        _ => bail!("no sample corpus for domain {domain}"),
    };
    let Some(text) = samples.get(index) else {
        bail!(
            "sample index {index} out of range: {domain} has {} samples",
            samples.len()
        );
    };
    println!("{text}");
    Ok(())
}
