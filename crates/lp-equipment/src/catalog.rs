use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::model::{EdfaModel, RoadmModel};
use crate::{EquipmentError, EquipmentResult};

/// Variety used for elements that do not name one.
pub const DEFAULT_VARIETY: &str = "default";

/// Immutable equipment library handed to the engine by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Equipment {
    #[serde(default, rename = "Edfa", alias = "edfa")]
    pub edfa: Vec<EdfaModel>,
    #[serde(default, rename = "Roadm", alias = "roadm")]
    pub roadm: Vec<RoadmModel>,
}

impl Equipment {
    /// Library shipped with the binary.
    pub fn builtin() -> Self {
        let default_roadm = RoadmModel {
            type_variety: DEFAULT_VARIETY.to_string(),
            target_pch_out_db: Some(-20.0),
            add_osnr_db: 38.0,
            drop_osnr_db: 38.0,
            express_osnr_db: 41.0,
        };
        Self {
            edfa: vec![
                EdfaModel::variable_gain(DEFAULT_VARIETY, 15.0, 26.0, 6.0, 10.0),
                EdfaModel::variable_gain("std_medium_gain", 15.0, 26.0, 6.0, 10.0),
                EdfaModel::variable_gain("std_low_gain", 8.0, 16.0, 6.5, 11.0),
                EdfaModel::variable_gain("std_high_gain", 25.0, 35.0, 5.5, 7.0),
                EdfaModel::fixed_gain("std_booster", 20.0, 21.0, 5.5),
            ],
            roadm: vec![
                default_roadm.clone(),
                RoadmModel {
                    type_variety: "example_test".to_string(),
                    target_pch_out_db: Some(-18.0),
                    ..default_roadm.clone()
                },
                RoadmModel {
                    type_variety: "unleveled".to_string(),
                    target_pch_out_db: None,
                    ..default_roadm
                },
            ],
        }
    }

    /// Look up an amplifier model. `None` selects [`DEFAULT_VARIETY`].
    pub fn edfa(&self, variety: Option<&str>) -> Option<&EdfaModel> {
        let variety = variety.unwrap_or(DEFAULT_VARIETY);
        self.edfa.iter().find(|m| m.type_variety == variety)
    }

    /// Look up a ROADM model. `None` selects [`DEFAULT_VARIETY`].
    pub fn roadm(&self, variety: Option<&str>) -> Option<&RoadmModel> {
        let variety = variety.unwrap_or(DEFAULT_VARIETY);
        self.roadm.iter().find(|m| m.type_variety == variety)
    }

    pub fn edfa_varieties(&self) -> impl Iterator<Item = &str> {
        self.edfa.iter().map(|m| m.type_variety.as_str())
    }

    pub fn roadm_varieties(&self) -> impl Iterator<Item = &str> {
        self.roadm.iter().map(|m| m.type_variety.as_str())
    }

    pub fn validate(&self) -> EquipmentResult<()> {
        let mut seen = HashSet::new();
        for model in &self.edfa {
            if !seen.insert(model.type_variety.as_str()) {
                return Err(EquipmentError::DuplicateVariety {
                    kind: "edfa",
                    variety: model.type_variety.clone(),
                });
            }
            model.validate()?;
        }

        seen.clear();
        for model in &self.roadm {
            if !seen.insert(model.type_variety.as_str()) {
                return Err(EquipmentError::DuplicateVariety {
                    kind: "roadm",
                    variety: model.type_variety.clone(),
                });
            }
            model.validate()?;
        }
        Ok(())
    }

    pub fn from_json_str(content: &str) -> EquipmentResult<Self> {
        let equipment: Equipment = serde_json::from_str(content)?;
        equipment.validate()?;
        Ok(equipment)
    }

    pub fn from_yaml_str(content: &str) -> EquipmentResult<Self> {
        let equipment: Equipment = serde_yaml::from_str(content)?;
        equipment.validate()?;
        Ok(equipment)
    }

    /// Load a library file, `.json` as JSON and anything else as YAML.
    pub fn load(path: &Path) -> EquipmentResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}
