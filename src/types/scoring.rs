use serde::{Deserialize, Serialize};
use std::fmt;

pub type Points = u32;

pub const MAX_TOTAL_SCORE: Points = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Project,
    Persona,
    Foundational,
    Experience,
    Learning,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Project,
        Category::Persona,
        Category::Foundational,
        Category::Experience,
        Category::Learning,
    ];

    /// Key of the category container in a raw evidence bundle.
    pub fn bundle_key(self) -> &'static str {
        match self {
            Category::Project => "projects",
            Category::Persona => "persona",
            Category::Foundational => "credentials",
            Category::Experience => "experience",
            Category::Learning => "learning",
        }
    }

    pub fn spec(self) -> &'static CategorySpec {
        let index = match self {
            Category::Project => 0,
            Category::Persona => 1,
            Category::Foundational => 2,
            Category::Experience => 3,
            Category::Learning => 4,
        };
        &CATEGORY_TABLE[index]
    }

    pub fn cap(self) -> Points {
        self.spec().cap
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Project => "project",
            Category::Persona => "persona",
            Category::Foundational => "foundational",
            Category::Experience => "experience",
            Category::Learning => "learning",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub category: Category,
    pub label: &'static str,
    pub cap: Points,
    pub weight_percent: u8,
}

/// Weighting policy shared by the scorer and the renderers.
pub const CATEGORY_TABLE: [CategorySpec; 5] = [
    CategorySpec {
        category: Category::Project,
        label: "Project evidence",
        cap: 500,
        weight_percent: 50,
    },
    CategorySpec {
        category: Category::Persona,
        label: "Persona/behavioral evidence",
        cap: 200,
        weight_percent: 20,
    },
    CategorySpec {
        category: Category::Foundational,
        label: "Foundational credentials",
        cap: 150,
        weight_percent: 15,
    },
    CategorySpec {
        category: Category::Experience,
        label: "Experience",
        cap: 100,
        weight_percent: 10,
    },
    CategorySpec {
        category: Category::Learning,
        label: "Continuous learning",
        cap: 50,
        weight_percent: 5,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub project: Points,
    pub persona: Points,
    pub foundational: Points,
    pub experience: Points,
    pub learning: Points,
}

impl Breakdown {
    /// Builds a breakdown, clamping every category to its cap.
    pub fn new(
        project: Points,
        persona: Points,
        foundational: Points,
        experience: Points,
        learning: Points,
    ) -> Self {
        Self {
            project: project.min(Category::Project.cap()),
            persona: persona.min(Category::Persona.cap()),
            foundational: foundational.min(Category::Foundational.cap()),
            experience: experience.min(Category::Experience.cap()),
            learning: learning.min(Category::Learning.cap()),
        }
    }

    pub fn get(&self, category: Category) -> Points {
        match category {
            Category::Project => self.project,
            Category::Persona => self.persona,
            Category::Foundational => self.foundational,
            Category::Experience => self.experience,
            Category::Learning => self.learning,
        }
    }

    pub fn total(&self) -> Points {
        self.project + self.persona + self.foundational + self.experience + self.learning
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Aspiring,
    Emerging,
    Competent,
    Skilled,
    Expert,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Aspiring => "aspiring",
            Tier::Emerging => "emerging",
            Tier::Competent => "competent",
            Tier::Skilled => "skilled",
            Tier::Expert => "expert",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    pub total_score: Points,
    pub tier: Tier,
    pub tier_description: String,
    pub breakdown: Breakdown,
}
