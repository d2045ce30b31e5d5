//! Fixed classification dictionaries.
//!
//! Process-wide read-only constants — injected nowhere, mutated never.

use crate::models::SkillCategory;

pub const PROGRAMMING_LANGUAGES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C#",
    "C++",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Scala",
    "Perl",
    "Objective-C",
    "Dart",
    "Elixir",
    "Haskell",
    "Clojure",
    "Lua",
    "MATLAB",
];

pub const DATABASES: &[&str] = &[
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "SQLite",
    "Oracle",
    "Cassandra",
    "DynamoDB",
    "Elasticsearch",
    "MariaDB",
    "Neo4j",
    "Couchbase",
];

pub const CLOUD_PLATFORMS: &[&str] = &[
    "AWS",
    "Azure",
    "GCP",
    "Google Cloud",
    "Heroku",
    "DigitalOcean",
    "Cloudflare",
    "Lambda",
    "EC2",
    "S3",
    "Firebase",
];

pub const DEVOPS_TOOLS: &[&str] = &[
    "Docker",
    "Kubernetes",
    "Jenkins",
    "Terraform",
    "Ansible",
    "CircleCI",
    "GitHub Actions",
    "GitLab CI",
    "Prometheus",
    "Grafana",
    "Helm",
    "Puppet",
    "Chef",
];

pub const FRONTEND_FRAMEWORKS: &[&str] = &[
    "React",
    "Angular",
    "Vue",
    "Svelte",
    "Next.js",
    "Nuxt",
    "HTML",
    "CSS",
    "Sass",
    "Tailwind",
    "Redux",
    "jQuery",
    "Webpack",
    "Vite",
];

pub const BACKEND_FRAMEWORKS: &[&str] = &[
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "Rails",
    "Laravel",
    ".NET",
    "FastAPI",
    "GraphQL",
    "gRPC",
    "Actix",
    "Axum",
    "Phoenix",
];

pub const MOBILE_PLATFORMS: &[&str] = &[
    "iOS",
    "Android",
    "React Native",
    "Flutter",
    "Xamarin",
    "SwiftUI",
    "Ionic",
];

pub const OTHER_TECHNICAL: &[&str] = &[
    "Git",
    "Linux",
    "Agile",
    "Scrum",
    "Jira",
    "Machine Learning",
    "TensorFlow",
    "PyTorch",
    "Kafka",
    "RabbitMQ",
    "Nginx",
    "Microservices",
    "CI/CD",
    "TDD",
    "REST",
    "OAuth",
];

/// Technical terms grouped by category, in match order.
pub const TECHNICAL_TERMS: &[(SkillCategory, &[&str])] = &[
    (SkillCategory::Programming, PROGRAMMING_LANGUAGES),
    (SkillCategory::Database, DATABASES),
    (SkillCategory::Cloud, CLOUD_PLATFORMS),
    (SkillCategory::Devops, DEVOPS_TOOLS),
    (SkillCategory::Frontend, FRONTEND_FRAMEWORKS),
    (SkillCategory::Backend, BACKEND_FRAMEWORKS),
    (SkillCategory::Mobile, MOBILE_PLATFORMS),
    (SkillCategory::Other, OTHER_TECHNICAL),
];

pub const SOFT_SKILLS: &[&str] = &[
    "Leadership",
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Time Management",
    "Collaboration",
    "Adaptability",
    "Critical Thinking",
    "Mentoring",
    "Public Speaking",
    "Negotiation",
    "Conflict Resolution",
    "Project Management",
];

pub const CERTIFICATION_TERMS: &[&str] = &[
    "AWS Certified",
    "Azure Certified",
    "Google Cloud Certified",
    "PMP",
    "CISSP",
    "CompTIA",
    "CKA",
    "CKAD",
    "CCNA",
    "Scrum Master",
    "CISA",
    "CEH",
];

/// Industry keyword → tag. Matching is substring, case-insensitive, over the
/// full document; tags are not mutually exclusive.
pub const INDUSTRY_KEYWORDS: &[(&str, &str)] = &[
    ("fintech", "Finance"),
    ("banking", "Finance"),
    ("trading", "Finance"),
    ("insurance", "Insurance"),
    ("healthcare", "Healthcare"),
    ("hospital", "Healthcare"),
    ("biotech", "Healthcare"),
    ("e-commerce", "Retail"),
    ("ecommerce", "Retail"),
    ("retail", "Retail"),
    ("gaming", "Gaming"),
    ("telecom", "Telecommunications"),
    ("logistics", "Logistics"),
    ("government", "Government"),
    ("consulting", "Consulting"),
    ("manufacturing", "Manufacturing"),
    ("education", "Education"),
    ("real estate", "Real Estate"),
    ("automotive", "Automotive"),
    ("aerospace", "Aerospace"),
];

pub const ROLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "consultant",
    "architect",
    "designer",
    "scientist",
    "administrator",
    "director",
    "lead",
    "intern",
    "specialist",
];

pub const ORG_SUFFIXES: &[&str] = &[
    "corp",
    "inc",
    "ltd",
    "llc",
    "company",
    "technologies",
    "systems",
    "solutions",
];

/// Canonical fields of study looked up on degree lines.
pub const DEGREE_FIELDS: &[&str] = &[
    "Computer Science",
    "Software Engineering",
    "Computer Engineering",
    "Information Technology",
    "Information Systems",
    "Electrical Engineering",
    "Mechanical Engineering",
    "Data Science",
    "Mathematics",
    "Statistics",
    "Physics",
    "Business Administration",
    "Economics",
    "Finance",
];

/// Keywords whose presence feeds the relevance axis of the quality score.
pub const TECH_RELEVANCE_KEYWORDS: &[&str] = &["developer", "engineer", "programming", "software"];
