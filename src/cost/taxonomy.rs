//! Canonical drilling cost taxonomy.
//! Every rig gets its own freshly built copy with all costs at zero.

use super::model::{Category, Item};
use std::sync::Arc;

type ItemSpec = (&'static str, &'static str);

const TAXONOMY: [(&str, &str, &[ItemSpec]); 5] = [
    (
        "pre-drilling",
        "🛠️ Pre-Drilling",
        &[
            ("land", "Land Acquisition / Site Preparation"),
            ("permits", "Permitting & Regulatory Fees"),
            ("environmental", "Environmental Assessments"),
            ("surveying", "Surveying & Engineering Design"),
            ("mobilization", "Mobilization of Equipment"),
            ("road", "Road & Location Construction"),
        ],
    ),
    (
        "drilling",
        "🧱 Drilling",
        &[
            ("rig", "Rig Rental / Rig Rate (Daily)"),
            ("fuel", "Fuel & Power Supply"),
            ("bits", "Drill Bits & Casing"),
            ("mud", "Mud & Chemicals"),
            ("services", "Drilling Services (MWD/LWD)"),
            ("directional", "Directional Drilling / Horizontal Sections"),
            ("cementing", "Cementing"),
        ],
    ),
    (
        "completion",
        "⚙️ Completion",
        &[
            ("logging", "Well Logging"),
            ("perforation", "Perforation"),
            ("stimulation", "Stimulation (Fracking/Acidizing)"),
            ("tubing-hanger", "Tubing Hanger"),
            ("prodn-tubing", "Prodn Tubing"),
            ("scsssv", "SCSSSV"),
            ("packer", "Packer"),
            ("ssd", "SSD"),
            ("no-go", "No-Go Locator Seal Assembly"),
            ("millout", "Millout Extension"),
            ("downhole", "Downhole Equipment"),
            ("wellhead", "Wellhead & Christmas Tree Installation"),
        ],
    ),
    (
        "post-completion",
        "🔧 Post-Completion",
        &[
            ("surface", "Surface Facilities & Hook-up"),
            ("pipeline", "Pipeline Tie-in"),
            ("testing", "Production Testing"),
            ("cleanup", "Clean-up Operations"),
            ("restoration", "Site Restoration / Waste Handling"),
        ],
    ),
    (
        "logistics",
        "🚚 Logistics & Other",
        &[
            ("transport", "Transport (equipment, personnel, materials)"),
            ("camp", "Camp / Accommodation & Catering"),
            ("security", "Security"),
            ("third-party", "Third-party Services"),
            ("insurance", "Insurance & Contingency"),
            ("communication", "Communication & Remote Monitoring"),
        ],
    ),
];

/// Build a fresh, independently owned copy of the cost taxonomy.
pub fn initial_costs() -> Vec<Arc<Category>> {
    TAXONOMY
        .iter()
        .map(|(id, name, items)| {
            Arc::new(Category {
                id: id.to_string(),
                name: name.to_string(),
                items: items
                    .iter()
                    .map(|(item_id, item_name)| Item {
                        id: item_id.to_string(),
                        name: item_name.to_string(),
                        cost: 0.0,
                    })
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_has_five_categories_with_expected_item_counts() {
        let costs = initial_costs();
        let counts: Vec<usize> = costs.iter().map(|c| c.items.len()).collect();
        assert_eq!(counts, vec![6, 7, 12, 5, 6]);
        assert!(costs.iter().flat_map(|c| &c.items).all(|i| i.cost == 0.0));
    }

    #[test]
    fn each_call_builds_independent_categories() {
        let a = initial_costs();
        let b = initial_costs();
        for (ca, cb) in a.iter().zip(b.iter()) {
            assert!(!Arc::ptr_eq(ca, cb));
            assert_eq!(ca, cb);
        }
    }
}
