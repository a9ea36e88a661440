//! Static protocol library and complaint-keyword map

use crate::error::{CdsError, Result};
use crate::models::Protocol;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

/// Name of the built-in "ongoing care" fallback protocol
pub const DEFAULT_PROTOCOL: &str = "Default";

#[rustfmt::skip]
const BUILTIN_PROTOCOLS: &[(&str, &str)] = &[
    (
        "Primary Survey",
        r#"🟩 **Initial Assessment (Primary Survey – ABCDE)**
- **A (Airway):** Check if blocked. If so, clear manually, suction, or insert an airway adjunct.
- **B (Breathing):** Check if breathing. If not, give 2 rescue breaths, provide O₂, or use a bag-valve-mask.
- **C (Circulation):** Check for a pulse. If absent, start CPR and attach an AED. If major bleeding, apply direct pressure.
- **D (Disability):** Check consciousness using the AVPU scale. If unresponsive, protect the airway.
- **E (Exposure):** Fully expose the patient to check for injuries, burns, bleeding, or fractures."#,
    ),
    (
        "Direct Pressure",
        r#"🟥 **For Major Bleeding**
- **Apply Direct Pressure:** Use sterile gauze to apply firm, direct pressure to the wound.
- **If Bleeding Continues:** For limb injuries, apply a tourniquet proximal to the wound.
- **Internal Bleeding Signs:** If suspected, keep the patient flat and slightly elevate their legs.
- **Monitor Vitals:** Re-check vital signs every 2-3 minutes.

*💡 Note: Administer oxygen and ensure rapid transport to a trauma center.*"#,
    ),
    (
        "Start CPR",
        r#"🟦 **For Cardiac Arrest (No Breathing / No Pulse)**
- **Start CPR:** Begin high-quality chest compressions immediately.
- **Attach Defibrillator:** As soon as available, attach an AED or manual defibrillator.
- **Follow Prompts:** Follow the voice commands from the AED. Minimize interruptions.
- **Continue Until ROSC:** Continue CPR until there is a return of spontaneous circulation (ROSC) or care is transferred."#,
    ),
    (
        "Administer Oxygen",
        r#"🟨 **For Respiratory Distress (SpO₂ < 94%)**
- **Give High-Flow Oxygen:** Administer 10–15 L/min via a non-rebreather mask.
- **Check for Wheezing:** If present, administer a bronchodilator (e.g., salbutamol).
- **Suspect Cardiac Cause:** If cyanosis or chest pain is present, move to the cardiac protocol."#,
    ),
    (
        "Administer Medication",
        r#"🟧 **For Suspected Heart Attack / Chest Pain**
- **Administer Oxygen:** Ensure the patient is receiving oxygen.
- **Administer Aspirin:** Give chewable aspirin if the patient is conscious and not allergic.
- **Monitor ECG:** If available, establish ECG monitoring to check for changes.
- **Prepare for Defibrillation:** Have the defibrillator ready and attached.

*💡 Note: Ensure rapid transport to a cardiac center.*"#,
    ),
    (
        "Recovery Position",
        r#"🟪 **For Unconscious but Breathing Patient**
- **Place in Recovery Position:** Carefully roll the patient onto their left side.
- **Maintain Airway:** Ensure the head is tilted back to keep the airway open.
- **Monitor Continuously:** Monitor breathing and pulse every minute."#,
    ),
    (
        "Immobilize Limb",
        r#"🟫 **For Suspected Fracture / Major Trauma**
- **Immobilize Limb:** Secure the injured limb using a splint to prevent further movement.
- **Control Bleeding:** Address any associated bleeding with direct pressure.
- **Avoid Movement:** Do not attempt to straighten a deformed limb. Splint it as it lies."#,
    ),
    (
        "Cool Burns",
        r#"⚫ **For Burns**
- **Cool the Burn:** Cool the area with clean water for 10-20 minutes. Do not use ice.
- **Cover the Burn:** Apply a sterile, non-stick dressing. Do not use any ointments.
- **Monitor for Shock:** Be vigilant for signs of shock (low BP, rapid pulse)."#,
    ),
    (
        "Manage Shock",
        r#"⚪ **For Shock (Low BP, Rapid Pulse, Pale, Sweaty)**
- **Position the Patient:** Lay the patient flat on their back.
- **Elevate Legs:** Raise the patient's legs (unless head/spine trauma is suspected).
- **Administer Oxygen:** Provide high-flow oxygen.
- **Control Bleeding:** Ensure any external bleeding is controlled.
- **Keep Warm:** Use a blanket to keep the patient warm."#,
    ),
    (
        "Seizure Care",
        r#"🔵 **For an Active Seizure**
- **Ensure Safety:** Protect the patient from injury. Do not restrain them.
- **Post-Seizure Care:** Once the seizure stops, place the patient in the recovery position.
- **Check ABCs:** Check airway and breathing.
- **Prolonged Seizure:** If seizure > 5 mins, administer emergency medication per protocol."#,
    ),
    (
        "Default",
        r#"🔶 **Ongoing Care & Transport**
- Continue any required interventions (oxygen, IV fluids)."#,
    ),
];

/// Complaint keyword → protocol name, in lookup order
const BUILTIN_COMPLAINT_MAP: &[(&str, &str)] = &[
    ("bleeding", "Direct Pressure"),
    ("breathing", "Administer Oxygen"),
    ("unconscious", "Recovery Position"),
    ("cardiac", "Start CPR"),
    ("arrest", "Start CPR"),
    ("chest pain", "Administer Medication"),
    ("heart attack", "Administer Medication"),
    ("fracture", "Immobilize Limb"),
    ("trauma", "Immobilize Limb"),
    ("burn", "Cool Burns"),
    ("shock", "Manage Shock"),
    ("seizure", "Seizure Care"),
    ("stroke", "Recovery Position"),
    ("poison", "Default"),
    ("accident", "Immobilize Limb"),
    ("fever", "Default"),
    ("abdominal", "Default"),
    ("pregnancy", "Default"),
    ("allergy", "Administer Oxygen"),
];

static BUILTIN: LazyLock<Arc<ProtocolLibrary>> = LazyLock::new(|| {
    Arc::new(ProtocolLibrary {
        protocols: BUILTIN_PROTOCOLS
            .iter()
            .map(|(name, document)| ((*name).to_string(), Protocol::new(*name, *document)))
            .collect(),
        complaint_map: BUILTIN_COMPLAINT_MAP
            .iter()
            .map(|(keyword, name)| ComplaintMapping {
                keyword: (*keyword).to_string(),
                protocol: (*name).to_string(),
            })
            .collect(),
        default_protocol: DEFAULT_PROTOCOL.to_string(),
    })
});

/// One complaint keyword pointing at a protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintMapping {
    pub keyword: String,
    pub protocol: String,
}

fn default_protocol_name() -> String {
    DEFAULT_PROTOCOL.to_string()
}

/// JSON layout of a custom library
#[derive(Debug, Deserialize)]
struct LibraryFile {
    protocols: BTreeMap<String, String>,
    #[serde(default)]
    complaint_map: Vec<ComplaintMapping>,
    #[serde(default = "default_protocol_name")]
    default_protocol: String,
}

/// Protocol documents keyed by name, plus the complaint-keyword lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolLibrary {
    protocols: BTreeMap<String, Protocol>,
    complaint_map: Vec<ComplaintMapping>,
    default_protocol: String,
}

impl ProtocolLibrary {
    /// The built-in library
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// A shared handle to the built-in library
    #[must_use]
    pub fn builtin_shared() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Build a custom library
    ///
    /// The default protocol and every complaint-map target must exist in
    /// `protocols`. Keywords are stored trimmed and lower-cased.
    pub fn new(
        protocols: impl IntoIterator<Item = Protocol>,
        complaint_map: Vec<ComplaintMapping>,
        default_protocol: impl Into<String>,
    ) -> Result<Self> {
        let protocols: BTreeMap<String, Protocol> = protocols
            .into_iter()
            .map(|protocol| (protocol.name.clone(), protocol))
            .collect();
        let default_protocol = default_protocol.into();

        if !protocols.contains_key(&default_protocol) {
            return Err(CdsError::KnowledgeBase(format!(
                "default protocol '{default_protocol}' is not in the library"
            )));
        }

        let mut normalized = Vec::with_capacity(complaint_map.len());
        for mapping in complaint_map {
            let keyword = mapping.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(CdsError::KnowledgeBase(format!(
                    "empty complaint keyword for protocol '{}'",
                    mapping.protocol
                )));
            }
            if !protocols.contains_key(&mapping.protocol) {
                return Err(CdsError::KnowledgeBase(format!(
                    "keyword '{keyword}' maps to unknown protocol '{}'",
                    mapping.protocol
                )));
            }
            normalized.push(ComplaintMapping {
                keyword,
                protocol: mapping.protocol,
            });
        }

        Ok(Self {
            protocols,
            complaint_map: normalized,
            default_protocol,
        })
    }

    /// Load a custom library from JSON:
    /// `{"protocols": {name: document}, "complaint_map": [...], "default_protocol": name}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: LibraryFile = serde_json::from_str(json)?;
        let library = Self::new(
            file.protocols
                .into_iter()
                .map(|(name, document)| Protocol::new(name, document)),
            file.complaint_map,
            file.default_protocol,
        )?;
        info!(
            "Loaded custom protocol library with {} protocols and {} complaint keywords",
            library.len(),
            library.complaint_map.len()
        );
        Ok(library)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Protocol> {
        self.protocols.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.protocols.contains_key(name)
    }

    /// Complaint keyword lookup table
    #[must_use]
    pub fn complaint_map(&self) -> &[ComplaintMapping] {
        &self.complaint_map
    }

    /// Name of the fallback protocol
    #[must_use]
    pub fn default_protocol(&self) -> &str {
        &self.default_protocol
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
