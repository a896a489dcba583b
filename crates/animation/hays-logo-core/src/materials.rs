//! Mesh-name material rules.
//!
//! The plan is plain data; adapters translate a [`MaterialSpec`] into their own
//! material type when the model's meshes appear.

use serde::{Deserialize, Serialize};

use crate::value::Vec3;

/// PBR-ish parameters shared by every host material model we target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Linear RGB.
    pub base_color: Vec3,
    pub metallic: f32,
    pub roughness: f32,
    /// Linear RGB, multiplied by `emissive_intensity`.
    #[serde(default)]
    pub emissive: Vec3,
    #[serde(default)]
    pub emissive_intensity: f32,
    #[serde(default = "default_true")]
    pub casts_shadows: bool,
}

fn default_true() -> bool {
    true
}

impl MaterialSpec {
    pub fn new(base_color: Vec3, metallic: f32, roughness: f32) -> Self {
        Self {
            base_color,
            metallic,
            roughness,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            casts_shadows: true,
        }
    }

    pub fn without_shadows(mut self) -> Self {
        self.casts_shadows = false;
        self
    }

    pub fn with_emissive(mut self, emissive: Vec3, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// Emissive color scaled by intensity.
    pub fn emissive_scaled(&self) -> Vec3 {
        [
            self.emissive[0] * self.emissive_intensity,
            self.emissive[1] * self.emissive_intensity,
            self.emissive[2] * self.emissive_intensity,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialRule {
    /// Exact mesh names this rule applies to.
    pub names: Vec<String>,
    /// `None` keeps the mesh's own material from the model file.
    #[serde(default)]
    pub material: Option<MaterialSpec>,
}

/// Ordered rules; the first rule naming a mesh wins, otherwise `default`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialPlan {
    pub rules: Vec<MaterialRule>,
    pub default: MaterialSpec,
}

impl MaterialPlan {
    pub fn new(default: MaterialSpec) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    pub fn rule<I, S>(self, names: I, material: MaterialSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_rule(names, Some(material))
    }

    /// Leave these meshes with the material they were loaded with.
    pub fn keep<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_rule(names, None)
    }

    fn push_rule<I, S>(mut self, names: I, material: Option<MaterialSpec>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.push(MaterialRule {
            names: names.into_iter().map(Into::into).collect(),
            material,
        });
        self
    }

    /// Material for a mesh, or `None` when a `keep` rule names it.
    pub fn for_mesh(&self, name: &str) -> Option<&MaterialSpec> {
        match self.rules.iter().find(|r| r.names.iter().any(|n| n == name)) {
            Some(rule) => rule.material.as_ref(),
            None => Some(&self.default),
        }
    }
}
