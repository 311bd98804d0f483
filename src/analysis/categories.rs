use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Reading,
    Design,
    Tools,
    Social,
    Video,
    Shopping,
    News,
    Portfolios,
    Jobs,
    Events,
    Travel,
    Other,
}

/// Static presentation data for a category. Never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDef {
    pub id: CategoryId,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl CategoryId {
    /// Canonical category order, used for groups and count tables.
    pub const ALL: [CategoryId; 12] = [
        CategoryId::Reading,
        CategoryId::Design,
        CategoryId::Tools,
        CategoryId::Social,
        CategoryId::Video,
        CategoryId::Shopping,
        CategoryId::News,
        CategoryId::Portfolios,
        CategoryId::Jobs,
        CategoryId::Events,
        CategoryId::Travel,
        CategoryId::Other,
    ];

    pub fn index(self) -> usize {
        match self {
            CategoryId::Reading => 0,
            CategoryId::Design => 1,
            CategoryId::Tools => 2,
            CategoryId::Social => 3,
            CategoryId::Video => 4,
            CategoryId::Shopping => 5,
            CategoryId::News => 6,
            CategoryId::Portfolios => 7,
            CategoryId::Jobs => 8,
            CategoryId::Events => 9,
            CategoryId::Travel => 10,
            CategoryId::Other => 11,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CategoryId::Reading => "reading",
            CategoryId::Design => "design",
            CategoryId::Tools => "tools",
            CategoryId::Social => "social",
            CategoryId::Video => "video",
            CategoryId::Shopping => "shopping",
            CategoryId::News => "news",
            CategoryId::Portfolios => "portfolios",
            CategoryId::Jobs => "jobs",
            CategoryId::Events => "events",
            CategoryId::Travel => "travel",
            CategoryId::Other => "other",
        }
    }

    pub fn def(self) -> &'static CategoryDef {
        &CATEGORIES[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.def().label
    }
}

pub static CATEGORIES: [CategoryDef; 12] = [
    CategoryDef {
        id: CategoryId::Reading,
        label: "Reading",
        icon: "📚",
        description: "Articles, blogs, newsletters",
    },
    CategoryDef {
        id: CategoryId::Design,
        label: "Design & UX",
        icon: "🎨",
        description: "Design resources and inspiration",
    },
    CategoryDef {
        id: CategoryId::Tools,
        label: "Tools",
        icon: "🛠️",
        description: "Productivity and dev tools",
    },
    CategoryDef {
        id: CategoryId::Social,
        label: "Social",
        icon: "💬",
        description: "Social media and communities",
    },
    CategoryDef {
        id: CategoryId::Video,
        label: "Video",
        icon: "📺",
        description: "YouTube, Vimeo, streaming",
    },
    CategoryDef {
        id: CategoryId::Shopping,
        label: "Shopping",
        icon: "🛒",
        description: "E-commerce and products",
    },
    CategoryDef {
        id: CategoryId::News,
        label: "News",
        icon: "📰",
        description: "News outlets and journalism",
    },
    CategoryDef {
        id: CategoryId::Portfolios,
        label: "Portfolios",
        icon: "💼",
        description: "Designer and developer portfolios",
    },
    CategoryDef {
        id: CategoryId::Jobs,
        label: "Jobs & Hiring",
        icon: "🎯",
        description: "Job boards and career resources",
    },
    CategoryDef {
        id: CategoryId::Events,
        label: "Events",
        icon: "📅",
        description: "Conferences, meetups, invites",
    },
    CategoryDef {
        id: CategoryId::Travel,
        label: "Travel",
        icon: "✈️",
        description: "Travel planning and destinations",
    },
    CategoryDef {
        id: CategoryId::Other,
        label: "Other",
        icon: "📎",
        description: "Miscellaneous tabs",
    },
];

/// Per-category tab counts, one slot per `CategoryId`, all starting at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([usize; 12]);

impl CategoryCounts {
    pub fn increment(&mut self, id: CategoryId) {
        self.0[id.index()] += 1;
    }

    pub fn get(&self, id: CategoryId) -> usize {
        self.0[id.index()]
    }

    pub fn sum(&self, ids: &[CategoryId]) -> usize {
        ids.iter().map(|id| self.get(*id)).sum()
    }
}
