//! Static portfolio content shown by the shell pages.

use serde::Serialize;

pub const OWNER_NAME: &str = "Shrvan Benke";
pub const OWNER_TITLE: &str = "Full-Stack Developer";
pub const LOCATION: &str = "mumbai, india";

pub const GITHUB_URL: &str = "https://github.com/pix-panther24";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/shrvanbenke/";
pub const CONTACT_EMAIL: &str = "benkeshrvan@gmail.com";

/// Lines a fresh transcript starts with.
pub const WELCOME_LINES: [&str; 3] = [
    "Welcome to my portfolio.",
    "I'm a full-stack developer passionate about creating innovative web solutions.",
    "Type \"help\" for available commands.",
];

pub const SKILLS: [&str; 6] = [
    "JavaScript (ES6+)",
    "React & Next.js",
    "Node.js & Express",
    "TypeScript",
    "GraphQL",
    "AWS & Serverless",
];

pub const ABOUT_PARAGRAPHS: [&str; 3] = [
    "I'm a full-stack engineer with a passion for building scalable and performant web applications. With years of experience in the industry, I've developed a keen eye for detail and a love for clean, efficient code.",
    "My journey in tech started with a fascination for how things work, which naturally led me to programming. Since then, I've worked on a variety of projects, from small startups to large enterprise applications, always striving to learn and improve my craft.",
    "When I'm not coding, you can find me exploring new technologies, contributing to open-source projects, or sharing my knowledge through tech talks and blog posts.",
];

pub const PROJECTS_INTRO: &str =
    "An assortment of my works, ranging from professional endeavors to personal coding adventures.";

pub const CONTACT_INTRO: &str = "I'm always open to new opportunities and collaborations. Feel free to reach out to me through any of the following channels:";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Project {
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
}

pub const PROJECTS: [Project; 5] = [
    Project {
        name: "wne3 live",
        role: "lead full stack engineer",
        description: "wne3 live is a first of its kind, peer-to-peer commerce platform. I lead the development of its web application while collaborating with interns and other developers.",
    },
    Project {
        name: "rift",
        role: "freelance developer",
        description: "A cutting-edge project focusing on innovative solutions for real-time data processing and visualization.",
    },
    Project {
        name: "indielettr",
        role: "founder, creator",
        description: "Empowering indie creators and small businesses to reach their audience through an intuitive email marketing platform.",
    },
    Project {
        name: "limitix",
        role: "maintainer, creator",
        description: "Flexible, in-memory rate limiting for single-server next.js applications, ensuring optimal performance and security.",
    },
    Project {
        name: "lettr0",
        role: "founder, creator",
        description: "Cut the crap with 0 effort email inbox management, using AI to categorize and prioritize your emails.",
    },
];

/// Social links as `(label, target)` pairs, footer order.
pub fn social_links() -> [(&'static str, String); 3] {
    [
        ("GitHub", GITHUB_URL.to_string()),
        ("LinkedIn", LINKEDIN_URL.to_string()),
        ("Email", format!("mailto:{}", CONTACT_EMAIL)),
    ]
}
