//! Condition knowledge base for differential-diagnosis scoring
//!
//! The built-in table is materialized once on first use and shared by every
//! scoring call. Hosts that ship their own rule set load it from JSON with
//! [`KnowledgeBase::from_json_str`].

use crate::error::{CdsError, Result};
use crate::models::DiagnosisRule;
use log::info;
use serde::Serialize;
use std::sync::{Arc, LazyLock};

/// (primary keywords, secondary signs, cause, action, complications, treatment label)
type RuleRow = (
    &'static [&'static str],
    &'static [&'static str],
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const BUILTIN_ROWS: &[RuleRow] = &[
    (
        &["unconscious", "unknown cause"],
        &["no response", "limp"],
        "Unconscious - unknown cause",
        "Check airway, breathing, circulation (ABC), oxygen, rapid transport",
        "Hypoxia, brain damage",
        "Unconscious - Unknown Cause",
    ),
    (
        &["unconscious", "head injury"],
        &["vomiting", "unequal pupils"],
        "Unconscious - head injury",
        "Airway, cervical spine immobilization, oxygen, transport",
        "Brain hemorrhage",
        "Head Injury / Brain Trauma",
    ),
    (
        &["unconscious", "hypoglycemia"],
        &["sweating", "confusion"],
        "Unconscious - hypoglycemia",
        "IV glucose if available, monitor airway, transport",
        "Seizure, brain injury",
        "Hypoglycemia",
    ),
    (
        &["unconscious", "cardiac arrest"],
        &["no pulse", "no breathing"],
        "Unconscious - cardiac arrest",
        "CPR, defibrillation if available, rapid transport",
        "Death",
        "Cardiac Arrest",
    ),
    (
        &["chest pain", "mi"],
        &["crushing chest pain", "sweating"],
        "Chest Pain - MI",
        "Oxygen, ECG, aspirin, rapid transport",
        "Cardiac arrest",
        "Myocardial Infarction (MI)",
    ),
    (
        &["chest pain", "angina"],
        &["pressure", "mild sob"],
        "Chest Pain - Angina",
        "Oxygen, monitor vitals, transport",
        "Risk of MI",
        "Angina",
    ),
    (
        &["chest pain", "pulmonary embolism"],
        &["sudden chest pain", "dyspnea"],
        "Chest Pain - Pulmonary embolism",
        "Oxygen, monitor vitals, transport",
        "Cardiac arrest",
        "Pulmonary Embolism",
    ),
    (
        &["chest pain", "pneumothorax"],
        &["sharp pain", "dyspnea"],
        "Chest Pain - Pneumothorax",
        "Oxygen, monitor, rapid transport",
        "Respiratory failure",
        "Pneumothorax",
    ),
    (
        &["accident", "trauma", "fracture"],
        &["pain", "swelling", "deformity", "bleeding"],
        "Accident/Trauma - fracture",
        "Immobilize, control bleeding, monitor vitals, transport",
        "Blood loss, infection, shock",
        "Fracture",
    ),
    (
        &["bleeding", "hemorrhage"],
        &["major bleeding", "trauma", "laceration"],
        "Major Bleeding / Hemorrhage",
        "Apply Direct Pressure, elevate limb, consider tourniquet for uncontrollable limb bleeding",
        "Hypovolemic Shock",
        "Major Bleeding",
    ),
    (
        &["accident", "trauma", "head injury"],
        &["confusion", "vomiting"],
        "Accident/Trauma - head injury",
        "Airway, cervical immobilization, oxygen, transport",
        "Brain bleed, coma",
        "Head Injury / Brain Trauma",
    ),
    (
        &["accident", "trauma", "spinal injury"],
        &["paralysis", "numbness"],
        "Accident/Trauma - spinal injury",
        "Spinal immobilization, airway, transport",
        "Permanent Disability",
        "Spinal Injury",
    ),
    (
        &["fever", "sepsis"],
        &["low bp", "confusion", "high temp"],
        "Fever - sepsis",
        "Oxygen, IV fluids, rapid transport",
        "Organ failure",
        "Sepsis",
    ),
    (
        &["seizure", "tonic-clonic"],
        &["convulsions", "loss of consciousness"],
        "Seizure - tonic-clonic",
        "Protect patient, monitor airway, oxygen, transport",
        "Hypoxia, injury",
        "Tonic-Clonic Seizure",
    ),
    (
        &["poisoning", "ingestion"],
        &["vomiting", "abdominal pain"],
        "Poisoning - Ingestion",
        "Identify poison, monitor airway, transport",
        "Organ failure, shock",
        "Poisoning - ingestion",
    ),
    (
        &["poisoning", "overdose"],
        &["confusion", "slow breathing"],
        "Poisoning - Drug Overdose",
        "Airway, oxygen, antidote (if available), transport",
        "Coma, respiratory arrest",
        "Poisoning - opioid overdose",
    ),
    (
        &["poisoning", "inhalation"],
        &["dizziness", "breathlessness"],
        "Poisoning - Inhalation (Toxic Gas)",
        "Remove exposure, give oxygen, transport",
        "Respiratory failure",
        "Poisoning - toxic inhalation",
    ),
    (
        &["stroke", "ischemic"],
        &["facial droop", "arm weakness", "slurred speech"],
        "Stroke - Ischemic",
        "Oxygen, monitor vitals, rapid transport to stroke center",
        "Paralysis, brain damage",
        "Stroke - ischemic",
    ),
    (
        &["stroke", "hemorrhagic"],
        &["sudden severe headache", "vomiting"],
        "Stroke - Hemorrhagic",
        "Airway, oxygen, elevate head, rapid transport",
        "Brain bleed, death",
        "Stroke - hemorrhagic",
    ),
    (
        &["stroke", "tia"],
        &["temporary weakness", "slurred speech"],
        "Stroke - TIA (Mini Stroke)",
        "Monitor, maintain airway, urgent hospital evaluation",
        "Recurrent stroke risk",
        "Stroke - transient ischemic attack",
    ),
    (
        &["chest pain", "severe"],
        &["pain radiating to arm/jaw", "sweating"],
        "Acute Coronary Syndrome",
        "O₂, ECG monitoring, aspirin, cardiac support",
        "Myocardial infarction",
        "Acute Coronary Syndrome",
    ),
    (
        &["unconsciousness"],
        &["no response", "low pulse"],
        "Coma / Cardiac Arrest",
        "ABC check, O₂, recovery position",
        "Brain injury, cardiac arrest",
        "Coma / Cardiac Arrest",
    ),
    (
        &["bleeding", "severe"],
        &["continuous bleeding", "pallor"],
        "Hemorrhagic Shock",
        "Apply pressure, IV fluids, urgent transfer",
        "Shock, organ failure",
        "Hemorrhagic Shock",
    ),
    (
        &["stroke"],
        &["slurred speech", "facial droop"],
        "Acute Stroke",
        "FAST test, O₂, rapid transport",
        "Brain ischemia, paralysis",
        "Acute Stroke",
    ),
    (
        &["breathing difficulty", "severe"],
        &["cyanosis", "low spo2"],
        "Respiratory Distress",
        "O₂, airway management, monitor SpO₂",
        "Respiratory failure",
        "Respiratory Distress",
    ),
    (
        &["accident trauma", "major"],
        &["fractures", "bleeding"],
        "Multi-System Trauma",
        "Immobilize spine, airway, IV fluids",
        "Internal bleeding",
        "Multi-System Trauma",
    ),
    (
        &["seizure", "ongoing"],
        &["convulsions >5 min"],
        "Neurological Emergency",
        "Protect from injury, O₂, IV access",
        "Status epilepticus",
        "Neurological Emergency",
    ),
    (
        &["poisoning", "severe"],
        &["vomiting", "confusion", "seizure"],
        "Toxicological Crisis",
        "Identify poison, airway, O₂, rapid transport",
        "Respiratory arrest, coma",
        "Toxicological Crisis",
    ),
    (
        &["pregnancy", "bleeding"],
        &["vaginal bleeding", "dizziness"],
        "Obstetric Hemorrhage",
        "Left lateral position, O₂, transport fast",
        "Miscarriage, hemorrhage",
        "Obstetric Hemorrhage",
    ),
    (
        &["abdominal pain", "severe"],
        &["guarding", "rigidity"],
        "GI / Internal Injury",
        "IV fluids, NPO, hospital transfer",
        "Peritonitis, internal bleeding",
        "GI / Internal Injury",
    ),
    (
        &["chest pain", "mild"],
        &["localized pain", "tender ribs"],
        "Musculoskeletal Pain",
        "Reassure, rest",
        "Muscular pain",
        "Musculoskeletal Pain",
    ),
    (
        &["fever", "high grade"],
        &[">102°f", "chills"],
        "Infectious Fever",
        "Tepid sponge, fluids, antibiotics",
        "Sepsis, meningitis",
        "Infectious Fever",
    ),
    (
        &["fever", "low grade"],
        &["99–101°f", "mild fatigue"],
        "Viral Infection",
        "Rest, fluids, paracetamol",
        "Viral infection",
        "Viral Infection",
    ),
    (
        &["bleeding", "minor"],
        &["small wound"],
        "Minor Injury",
        "Clean wound, antiseptic dressing",
        "Local infection",
        "Minor Injury",
    ),
    (
        &["seizure", "single"],
        &["short convulsion", "recovery"],
        "Isolated Seizure",
        "Protect from injury, monitor",
        "Epileptic event",
        "Isolated Seizure",
    ),
    (
        &["pregnancy", "labor"],
        &["regular contractions", "back pain"],
        "Active Labor",
        "Prepare delivery kit, monitor fetal movement",
        "Normal / preterm labor",
        "Active Labor",
    ),
    (
        &["accident", "minor"],
        &["bruises", "abrasions"],
        "Minor Trauma",
        "Clean wound, apply dressing",
        "Local infection",
        "Minor Trauma",
    ),
    (
        &["stroke", "tia"],
        &["temporary weakness"],
        "Mini Stroke",
        "FAST test, O₂, referral",
        "Major stroke risk",
        "Mini Stroke",
    ),
    (
        &["unconsciousness", "fainting"],
        &["short loss of consciousness"],
        "Syncope",
        "Lay flat, check glucose",
        "Hypoglycemia, dehydration",
        "Syncope",
    ),
    (
        &["breathing difficulty", "asthma"],
        &["wheezing", "tight chest"],
        "Asthma Attack",
        "Sit upright, O₂, inhaler",
        "Asthma exacerbation",
        "Asthma Attack",
    ),
    (
        &["poisoning", "mild"],
        &["nausea", "vomiting"],
        "Mild Toxicity",
        "Oral fluids, monitor",
        "GI irritation",
        "Mild Toxicity",
    ),
    (
        &["abdominal pain", "mild"],
        &["cramps", "bloating"],
        "GI Discomfort",
        "Fluids, rest",
        "Gastritis",
        "GI Discomfort",
    ),
    (
        &["fever", "dengue suspect"],
        &["high fever", "rash", "joint pain"],
        "Dengue / Viral Hemorrhagic Fever",
        "IV fluids, O₂ if low BP",
        "Shock, dehydration",
        "Dengue / Viral Hemorrhagic Fever",
    ),
    (
        &["accident trauma", "head injury"],
        &["bleeding from scalp", "vomiting"],
        "Head Trauma",
        "Immobilize head, O₂, rapid transfer",
        "Brain injury, internal bleed",
        "Head Trauma",
    ),
    (
        &["seizure", "postpartum"],
        &["convulsions after delivery"],
        "Postpartum Eclampsia",
        "Protect airway, MgSO₄, urgent transfer",
        "Eclampsia",
        "Postpartum Eclampsia",
    ),
    (
        &["pregnancy", "high bp"],
        &["swelling", "headache", "blurred vision"],
        "Pregnancy Hypertension",
        "Monitor BP, left lateral, hospital transfer",
        "Pre-eclampsia",
        "Pregnancy Hypertension",
    ),
    (
        &["chest pain", "anxiety"],
        &["fast breathing", "panic"],
        "Anxiety Episode",
        "Reassure, deep breathing",
        "Hyperventilation",
        "Anxiety Episode",
    ),
    (
        &["breathing difficulty", "copd"],
        &["chronic cough", "fatigue"],
        "COPD Exacerbation",
        "O₂ support, nebulization",
        "Hypoxia",
        "COPD Exacerbation",
    ),
    (
        &["abdominal pain", "pregnancy"],
        &["cramping", "back pain"],
        "Labor Onset",
        "Monitor contractions, prepare for delivery",
        "Preterm labor",
        "Labor Onset",
    ),
    (
        &["bleeding", "nosebleed"],
        &["nasal bleeding"],
        "Epistaxis",
        "Pinch nose, tilt forward, ice",
        "Hypertension, local injury",
        "Epistaxis",
    ),
    (
        &["stroke", "severe"],
        &["unconscious", "unequal pupils"],
        "Hemorrhagic Stroke",
        "O₂, rapid neuro referral",
        "Cerebral hemorrhage",
        "Hemorrhagic Stroke",
    ),
    (
        &["fever", "child"],
        &["crying", "hot skin"],
        "Pediatric Fever",
        "Tepid sponge, paracetamol",
        "Febrile seizure",
        "Pediatric Fever",
    ),
    (
        &["unconsciousness", "after seizure"],
        &["postictal confusion"],
        "Post-Seizure State",
        "O₂, airway check",
        "Brain hypoxia",
        "Post-Seizure State",
    ),
    (
        &["pregnancy", "normal"],
        &["mild back pain", "nausea"],
        "Normal Pregnancy",
        "Hydration, observation",
        "Stable",
        "Normal Pregnancy",
    ),
    (
        &["accident trauma", "chest"],
        &["pain", "difficulty breathing"],
        "Chest Trauma",
        "Immobilize, O₂, urgent care",
        "Rib fracture, pneumothorax",
        "Chest Trauma",
    ),
    (
        &["poisoning", "inhalation"],
        &["cough", "breathlessness"],
        "Inhalation Poisoning",
        "Remove from area, O₂",
        "Chemical pneumonitis",
        "Inhalation Poisoning",
    ),
    (
        &["abdominal pain", "child"],
        &["crying", "vomiting"],
        "Pediatric GI Emergency",
        "NPO, transport fast",
        "Appendicitis",
        "Pediatric GI Emergency",
    ),
    (
        &["breathing difficulty", "allergy"],
        &["swelling", "rash", "low bp"],
        "Anaphylactic Shock",
        "Adrenaline, O₂, IV fluids",
        "Anaphylaxis",
        "Anaphylactic Shock",
    ),
    (
        &["seizure", "fever induced"],
        &["high fever", "jerking"],
        "Febrile Convulsion",
        "Tepid sponge, monitor",
        "Febrile seizure",
        "Febrile Convulsion",
    ),
    (
        &["pregnancy", "postpartum bleeding"],
        &["heavy bleeding after delivery"],
        "Postpartum Hemorrhage",
        "Fundal massage, IV fluids, urgent transfer",
        "Shock, death",
        "Postpartum Hemorrhage",
    ),
];

static BUILTIN: LazyLock<Arc<KnowledgeBase>> = LazyLock::new(|| {
    Arc::new(KnowledgeBase {
        rules: BUILTIN_ROWS.iter().map(rule_from_row).collect(),
    })
});

fn rule_from_row(row: &RuleRow) -> DiagnosisRule {
    let (primary, secondary, cause, action, complications, treatment) = *row;
    DiagnosisRule {
        primary_complaints: primary.iter().map(|kw| (*kw).to_string()).collect(),
        secondary_signs: secondary.iter().map(|kw| (*kw).to_string()).collect(),
        cause: cause.to_string(),
        action: action.to_string(),
        complications: complications.to_string(),
        treatment_label: treatment.to_string(),
    }
}

/// Ordered, read-only set of diagnosis rules
///
/// Rule order matters: it breaks score ties in the ranked output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeBase {
    rules: Vec<DiagnosisRule>,
}

impl KnowledgeBase {
    /// The built-in knowledge base
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// A shared handle to the built-in knowledge base; every handle points
    /// at the same table
    #[must_use]
    pub fn builtin_shared() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Build from custom rules, normalizing keywords to trimmed lower case
    ///
    /// Every rule needs at least one primary keyword and a non-empty cause.
    pub fn new(rules: Vec<DiagnosisRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(idx, rule)| normalize_rule(idx, rule))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Load a custom knowledge base from a JSON array of rules
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: Vec<DiagnosisRule> = serde_json::from_str(json)?;
        let knowledge_base = Self::new(rules)?;
        info!(
            "Loaded custom knowledge base with {} rules",
            knowledge_base.len()
        );
        Ok(knowledge_base)
    }

    /// Rules in table order
    #[must_use]
    pub fn rules(&self) -> &[DiagnosisRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosisRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}

fn normalize_rule(idx: usize, mut rule: DiagnosisRule) -> Result<DiagnosisRule> {
    rule.primary_complaints = normalize_keywords(rule.primary_complaints);
    rule.secondary_signs = normalize_keywords(rule.secondary_signs);
    rule.cause = rule.cause.trim().to_string();

    if rule.cause.is_empty() {
        return Err(CdsError::KnowledgeBase(format!(
            "rule {idx} has an empty cause"
        )));
    }
    if rule.primary_complaints.is_empty() {
        return Err(CdsError::KnowledgeBase(format!(
            "rule {idx} ('{}') has no primary complaint keywords",
            rule.cause
        )));
    }
    Ok(rule)
}
