//! Static content for the folio pages.
//!
//! Every page reads its records from here; nothing in this crate has
//! behavior beyond lookups over literal data.

/// Owner of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub summary: &'static str,
    pub email: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Kathirvelan M",
    summary: "A passionate B.Tech student in Artificial Intelligence and Data Science with a \
              solid foundation in web development, data analysis, and programming. My goal is \
              to become a proficient and ethical AI professional contributing to society's \
              advancement.",
    email: "kathirvelan418@gmail.com",
};

/// Kind of milestone, used to pick the timeline marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneKind {
    Education,
    Work,
    Training,
}

impl MilestoneKind {
    /// Marker drawn on the timeline rail.
    pub fn marker(self) -> char {
        match self {
            MilestoneKind::Education => '◆',
            MilestoneKind::Work => '■',
            MilestoneKind::Training => '●',
        }
    }
}

/// One entry of the About page timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEvent {
    pub kind: MilestoneKind,
    pub date: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TIMELINE: &[TimelineEvent] = &[
    TimelineEvent {
        kind: MilestoneKind::Education,
        date: "Ongoing",
        title: "B.Tech in AI & Data Science",
        description: "Studying at Solamalai College of Engineering, building a strong foundation \
                      in machine learning and data analysis.",
    },
    TimelineEvent {
        kind: MilestoneKind::Work,
        date: "Completed",
        title: "Web Development Intern",
        description: "Honing my React skills and contributing to real-world projects at Fortis \
                      Legal Solution.",
    },
    TimelineEvent {
        kind: MilestoneKind::Training,
        date: "Completed",
        title: "Full-Stack Development Bootcamp",
        description: "Mastered the MERN stack through intensive training at Karam Academy.",
    },
    TimelineEvent {
        kind: MilestoneKind::Training,
        date: "Completed",
        title: "Data Analytics Bootcamp",
        description: "Gained hands-on experience in data manipulation and visualization with \
                      Novitech.",
    },
    TimelineEvent {
        kind: MilestoneKind::Work,
        date: "Internship",
        title: "Nuvolix Software Solution",
        description: "Applied my skills in a professional environment, contributing to various \
                      tech projects.",
    },
];

/// A project card and its modal details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub detailed_description: &'static str,
    pub tech: &'static [&'static str],
    pub link: &'static str,
}

impl Project {
    /// Number of tech tags shown on the card; the modal shows all of them.
    pub const CARD_TAGS: usize = 3;

    /// Tags shown on the card.
    pub fn card_tags(&self) -> &'static [&'static str] {
        &self.tech[..self.tech.len().min(Self::CARD_TAGS)]
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Face Recognition AI",
        description: "A real-time face recognition system using OpenCV and Python.",
        detailed_description: "This project implements a real-time face recognition system \
                               capable of detecting and identifying individuals from a live \
                               webcam stream...",
        tech: &["Python", "OpenCV", "Face Recognition", "NumPy"],
        link: "https://github.com/Kathirvelan189/Face-Racognition",
    },
    Project {
        title: "COVID-19 Analysis",
        description: "A machine learning model to predict future COVID-19 cases.",
        detailed_description: "This data analysis project involved building a predictive model \
                               to forecast future COVID-19 cases...",
        tech: &["Python", "Scikit-learn", "Pandas", "Matplotlib"],
        link: "https://github.com/Kathirvelan189/covid-19-Analysis",
    },
    Project {
        title: "Portfolio Website",
        description: "Designed and built this personal portfolio using React and Tailwind.",
        detailed_description: "My personal portfolio, the site you are currently on, was \
                               designed and developed from scratch...",
        tech: &["React", "Tailwind CSS", "JavaScript", "Three.js"],
        link: "https://github.com/Kathirvelan189/",
    },
];

/// A single skill with its proficiency in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
}

impl Skill {
    /// Short badge drawn in place of an icon.
    pub fn badge(&self) -> String {
        let known = match self.name {
            "HTML" => Some("H5"),
            "CSS" => Some("C3"),
            "JavaScript" => Some("JS"),
            "React" => Some("Re"),
            "Tailwind CSS" => Some("TW"),
            "Node.js" => Some("No"),
            "Express" => Some("Ex"),
            "Python" => Some("Py"),
            "Pandas" => Some("PD"),
            "NumPy" => Some("NP"),
            "Scikit-learn" => Some("SK"),
            "Streamlit" => Some("ST"),
            "Git" => Some("Gi"),
            "GitHub" => Some("GH"),
            "VS Code" => Some("VS"),
            "Power BI" => Some("PB"),
            _ => None,
        };
        match known {
            Some(badge) => badge.to_string(),
            None => self.name.chars().take(1).collect(),
        }
    }
}

/// A named group of skills shown under one category tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillGroup {
    pub category: &'static str,
    pub skills: &'static [Skill],
}

pub const SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        category: "Frontend",
        skills: &[
            Skill { name: "HTML", level: 95 },
            Skill { name: "CSS", level: 90 },
            Skill { name: "JavaScript", level: 85 },
            Skill { name: "React", level: 88 },
            Skill { name: "Tailwind CSS", level: 92 },
        ],
    },
    SkillGroup {
        category: "Backend",
        skills: &[
            Skill { name: "Node.js", level: 75 },
            Skill { name: "Express", level: 80 },
        ],
    },
    SkillGroup {
        category: "AI & Data Science",
        skills: &[
            Skill { name: "Python", level: 90 },
            Skill { name: "Pandas", level: 85 },
            Skill { name: "NumPy", level: 80 },
            Skill { name: "Scikit-learn", level: 78 },
            Skill { name: "Streamlit", level: 75 },
        ],
    },
    SkillGroup {
        category: "Tools & Platforms",
        skills: &[
            Skill { name: "Git", level: 90 },
            Skill { name: "GitHub", level: 88 },
            Skill { name: "VS Code", level: 95 },
            Skill { name: "Power BI", level: 80 },
        ],
    },
];

/// A contact card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactLink {
    pub title: &'static str,
    pub text: &'static str,
    pub link: &'static str,
}

impl ContactLink {
    /// Text of the card's call-to-action link.
    pub fn action_label(&self) -> &'static str {
        match self.link.strip_prefix("mailto:") {
            Some(address) => address,
            None => "Connect",
        }
    }
}

pub const CONTACTS: &[ContactLink] = &[
    ContactLink {
        title: "Email",
        text: "Reach out directly",
        link: "mailto:kathirvelan418@gmail.com",
    },
    ContactLink {
        title: "LinkedIn",
        text: "Let's connect professionally",
        link: "https://www.linkedin.com/in/kathirvelan-m-ab558125b",
    },
    ContactLink {
        title: "GitHub",
        text: "Explore my projects",
        link: "https://github.com/Kathirvelan189",
    },
];

/// Closing call to action on the Contact page.
pub const CALL_TO_ACTION: &str = "I'm currently available for freelance work and open to \
                                  full-time opportunities. If you have a project that you want \
                                  to get started or think you need my help with something, then \
                                  get in touch.";
