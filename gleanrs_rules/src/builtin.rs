//! Built-in healthcare and finance rule sets.
//!
//! The embedded catalog keeps the binary usable without any setup; the
//! CLI `init` command writes the same JSON to disk as a starting point
//! for customization.

use crate::catalog::{CatalogError, RuleCatalog};

/// Default rule catalog JSON (healthcare and finance domains).
pub const DEFAULT_RULES_JSON: &str = r#"{
  "healthcare_entities": {
    "PATIENT": {
      "patterns": ["patient", "(?:mr|mrs|ms|dr)\\.?\\s+\\w+"],
      "context_words": ["admitted", "discharged", "presented", "examination", "year-old"]
    },
    "MEDICATION": {
      "patterns": [
        "aspirin", "metoprolol", "metformin", "ibuprofen", "lisinopril",
        "atorvastatin", "insulin", "warfarin", "amoxicillin", "azithromycin",
        "prednisone", "albuterol", "heparin"
      ],
      "context_words": ["prescribed", "medication", "dose", "daily", "mg", "tablet", "started"]
    },
    "DISEASE": {
      "patterns": [
        "type\\s+[12]\\s+diabetes(?:\\s+mellitus)?", "diabetes(?:\\s+mellitus)?",
        "hypertension", "pneumonia", "asthma", "appendicitis", "bronchitis",
        "myocardial\\s+infarction", "heart\\s+disease", "heart\\s+failure",
        "influenza", "anemia", "migraine", "copd"
      ],
      "context_words": ["diagnosed", "history", "chronic", "acute", "condition"]
    },
    "SYMPTOM": {
      "patterns": [
        "chest\\s+pain", "shortness\\s+of\\s+breath", "abdominal\\s+pain",
        "back\\s+pain", "headache", "fever", "nausea", "dizziness",
        "fatigue", "cough", "sore\\s+throat"
      ],
      "context_words": ["complained", "complaints", "presented", "severe", "persistent"]
    },
    "TREATMENT": {
      "patterns": [
        "surgery", "appendectomy", "chemotherapy", "dialysis",
        "physical\\s+therapy", "cardiac\\s+catheterization", "catheterization",
        "vaccination", "transfusion", "angioplasty", "intubation"
      ],
      "context_words": ["underwent", "performed", "scheduled", "procedure", "emergency"]
    }
  },
  "healthcare_events": {
    "admission": {
      "triggers": ["admitted", "admission", "hospitalized"],
      "attributes": ["patient", "date", "hospital"]
    },
    "discharge": {
      "triggers": ["discharged", "discharge"],
      "attributes": ["patient", "date"]
    },
    "prescription": {
      "triggers": ["prescribed", "started on"],
      "attributes": ["patient", "medication", "dosage", "date"]
    },
    "diagnosis": {
      "triggers": ["diagnosed", "diagnosis"],
      "attributes": ["patient", "disease", "date"]
    },
    "procedure": {
      "triggers": ["underwent", "performed", "scheduled for"],
      "attributes": ["patient", "treatment", "date", "time", "location"]
    },
    "follow_up": {
      "triggers": ["follow-up", "follow up"],
      "attributes": ["date", "time", "location"]
    }
  },
  "finance_entities": {
    "COMPANY": {
      "patterns": ["\\w+\\s+(?:inc|corp|corporation|ltd|llc|plc)"],
      "context_words": ["acquired", "merger", "shares", "announced", "company", "deal"]
    },
    "AMOUNT": {
      "patterns": [
        "\\d+(?:\\.\\d+)?\\s*(?:million|billion|trillion)(?:\\s+(?:dollars|euros|pounds))?",
        "\\d+(?:,\\d{3})*(?:\\.\\d+)?\\s*(?:dollars|euros|pounds|usd|eur|gbp)"
      ],
      "context_words": ["paid", "worth", "valued", "price", "raised", "deal"]
    },
    "INSTRUMENT": {
      "patterns": ["stocks?", "shares?", "bonds?", "options?", "futures", "securities", "etfs?", "equity"],
      "context_words": ["market", "traded", "portfolio", "investors", "rose"]
    },
    "ACCOUNT": {
      "patterns": ["(?:savings|checking|current|bank|brokerage)\\s+account", "account\\s+\\d+"],
      "context_words": ["deposited", "withdrawn", "balance", "transferred", "opened"]
    }
  },
  "finance_events": {
    "transaction": {
      "triggers": ["transferred", "deposited", "withdrew", "paid"],
      "attributes": ["amount", "account", "date"]
    },
    "acquisition": {
      "triggers": ["acquired", "acquisition", "takeover"],
      "attributes": ["company", "amount", "date"]
    },
    "merger": {
      "triggers": ["merged", "merger"],
      "attributes": ["company", "date"]
    },
    "ipo": {
      "triggers": ["went public", "initial public offering", "ipo", "listed"],
      "attributes": ["company", "amount", "date"]
    }
  }
}
"#;

impl RuleCatalog {
    /// The embedded default catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_RULES_JSON)
    }
}
