//! Built-in pools: curated skill lists and the demo profiles.

use super::PoolItem;

/// A curated list of skills to pick from. Every entry starts at
/// proficiency 0, so imported entries become aspirational skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSource {
    LinkedIn,
    GitHubTrending,
    JobMarket,
}

impl PoolSource {
    pub const ALL: [Self; 3] = [Self::LinkedIn, Self::GitHubTrending, Self::JobMarket];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn Skills",
            Self::GitHubTrending => "GitHub Trending",
            Self::JobMarket => "Job Market Skills",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::LinkedIn => "Popular professional skills from LinkedIn's database",
            Self::GitHubTrending => "Trending technologies on GitHub",
            Self::JobMarket => "In-demand skills from current job market",
        }
    }

    #[must_use]
    pub fn skills(&self) -> Vec<PoolItem> {
        let table = match self {
            Self::LinkedIn => LINKEDIN_SKILLS,
            Self::GitHubTrending => GITHUB_TRENDING_SKILLS,
            Self::JobMarket => JOB_MARKET_SKILLS,
        };
        table
            .iter()
            .map(|&(name, category, description)| {
                PoolItem::new(name, category, 0).with_description(description)
            })
            .collect()
    }
}

impl std::str::FromStr for PoolSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Self::LinkedIn),
            "github" | "github-trending" => Ok(Self::GitHubTrending),
            "jobs" | "job-market" => Ok(Self::JobMarket),
            other => Err(format!(
                "unknown pool source '{other}' (expected linkedin, github, job-market)"
            )),
        }
    }
}

/// Built-in demo profiles. Each set extends the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSet {
    /// Ten web-development basics with six edges.
    Starter,
    /// Adds frameworks and tooling: 20 skills, 16 edges.
    Intermediate,
    /// Adds backend and infrastructure: 30 skills, 26 edges.
    Advanced,
    /// Adds systems languages and newer web stacks: 35 skills, 31 edges.
    Senior,
    /// Adds graphics, real-time and WebAssembly: 40 skills, 36 edges.
    Expert,
    /// Adds machine learning and security: 45 skills, 41 edges.
    Master,
}

impl DemoSet {
    pub const ALL: [Self; 6] = [
        Self::Starter,
        Self::Intermediate,
        Self::Advanced,
        Self::Senior,
        Self::Expert,
        Self::Master,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Starter => "10 Skills - Starter",
            Self::Intermediate => "20 Skills - Intermediate",
            Self::Advanced => "30 Skills - Advanced",
            Self::Senior => "35 Skills - Senior",
            Self::Expert => "40 Skills - Expert",
            Self::Master => "45 Skills - Master",
        }
    }

    #[must_use]
    pub const fn skill_count(&self) -> usize {
        match self {
            Self::Starter => 10,
            Self::Intermediate => 20,
            Self::Advanced => 30,
            Self::Senior => 35,
            Self::Expert => 40,
            Self::Master => 45,
        }
    }

    const fn dependency_count(&self) -> usize {
        match self {
            Self::Starter => 6,
            Self::Intermediate => 16,
            Self::Advanced => 26,
            Self::Senior => 31,
            Self::Expert => 36,
            Self::Master => 41,
        }
    }

    #[must_use]
    pub fn skills(&self) -> Vec<PoolItem> {
        DEMO_SKILLS[..self.skill_count()]
            .iter()
            .map(|&(name, category, proficiency, description)| {
                PoolItem::new(name, category, proficiency).with_description(description)
            })
            .collect()
    }

    /// `(from, to, required, description)` tuples.
    #[must_use]
    pub fn dependencies(&self) -> &'static [(&'static str, &'static str, u8, &'static str)] {
        &DEMO_DEPENDENCIES[..self.dependency_count()]
    }
}

impl std::str::FromStr for DemoSet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "starter" | "10" => Ok(Self::Starter),
            "intermediate" | "20" => Ok(Self::Intermediate),
            "advanced" | "30" => Ok(Self::Advanced),
            "senior" | "35" => Ok(Self::Senior),
            "expert" | "40" => Ok(Self::Expert),
            "master" | "45" => Ok(Self::Master),
            other => Err(format!(
                "unknown demo set '{other}' (expected starter, intermediate, advanced, senior, expert, master)"
            )),
        }
    }
}

const LINKEDIN_SKILLS: &[(&str, &str, &str)] = &[
    ("Machine Learning", "Artificial Intelligence", "Building intelligent systems that learn from data"),
    ("Data Science", "Data Analysis", "Extracting insights from large datasets"),
    ("Cloud Computing", "Infrastructure", "AWS, Azure, Google Cloud platforms"),
    ("DevOps", "Operations", "Continuous integration and deployment practices"),
    ("Artificial Intelligence", "AI/ML", "Creating intelligent automation systems"),
    ("Cybersecurity", "Security", "Protecting systems and data from threats"),
    ("Mobile Development", "Mobile", "iOS and Android app development"),
    ("UI/UX Design", "Design", "User interface and experience design"),
    ("Leadership", "Management", "Leading teams and driving results"),
    ("Project Management", "Management", "Planning and executing projects successfully"),
    ("Communication", "Soft Skills", "Effective verbal and written communication"),
    ("Problem Solving", "Soft Skills", "Analytical thinking and solution finding"),
    ("Teamwork", "Soft Skills", "Collaborating effectively with others"),
    ("Adaptability", "Soft Skills", "Flexibility in changing environments"),
];

const GITHUB_TRENDING_SKILLS: &[(&str, &str, &str)] = &[
    ("Rust", "Programming", "Systems programming language focused on safety"),
    ("Go", "Programming", "Fast, statically typed language by Google"),
    ("Kotlin", "Programming", "Modern alternative to Java for Android"),
    ("Swift", "Programming", "Apple's programming language for iOS/macOS"),
    ("TypeScript", "Programming", "Typed superset of JavaScript"),
    ("Next.js", "Web Development", "React framework for production"),
    ("Svelte", "Web Development", "Compile-time web framework"),
    ("Tailwind CSS", "Web Development", "Utility-first CSS framework"),
    ("FastAPI", "Backend Development", "Modern Python web framework"),
    ("Deno", "Backend Development", "Secure runtime for JavaScript/TypeScript"),
    ("Docker", "DevOps", "Containerization platform"),
    ("Kubernetes", "DevOps", "Container orchestration system"),
    ("GraphQL", "API Development", "Query language for APIs"),
    ("Web3", "Blockchain", "Decentralized web technologies"),
    ("TensorFlow", "Machine Learning", "Open source ML framework"),
];

const JOB_MARKET_SKILLS: &[(&str, &str, &str)] = &[
    ("AWS", "Cloud Computing", "Amazon Web Services cloud platform"),
    ("React", "Web Development", "JavaScript library for building UIs"),
    ("Python", "Programming", "Versatile programming language"),
    ("SQL", "Database", "Database query language"),
    ("Java", "Programming", "Enterprise programming language"),
    ("Node.js", "Backend Development", "JavaScript runtime environment"),
    ("Salesforce", "CRM", "Customer relationship management platform"),
    ("Tableau", "Data Visualization", "Business intelligence and analytics"),
    ("Power BI", "Data Visualization", "Microsoft business analytics tool"),
    ("Agile", "Methodology", "Iterative project management approach"),
    ("Scrum", "Methodology", "Agile framework for product development"),
    ("JIRA", "Tools", "Issue tracking and project management"),
    ("Git", "Version Control", "Distributed version control system"),
    ("Jenkins", "CI/CD", "Automation server for CI/CD pipelines"),
    ("Microservices", "Architecture", "Distributed system architecture pattern"),
];

// Ordered so that every demo set is a prefix.
const DEMO_SKILLS: &[(&str, &str, u8, &str)] = &[
    ("HTML", "Web Development", 8, "Basic HTML markup language"),
    ("CSS", "Web Development", 7, "Styling web pages"),
    ("JavaScript", "Programming", 6, "Client-side scripting"),
    ("Git", "Tools", 5, "Version control system"),
    ("React", "Web Development", 4, "JavaScript UI library"),
    ("Node.js", "Backend Development", 3, "JavaScript runtime"),
    ("Python", "Programming", 7, "Versatile programming language"),
    ("SQL", "Database", 6, "Database query language"),
    ("Docker", "DevOps", 2, "Containerization platform"),
    ("Linux", "Systems", 5, "Unix-like operating system"),
    ("TypeScript", "Programming", 5, "Typed JavaScript superset"),
    ("Vue.js", "Web Development", 6, "Progressive JavaScript framework"),
    ("MongoDB", "Database", 4, "NoSQL document database"),
    ("Express.js", "Backend Development", 5, "Node.js web framework"),
    ("AWS", "Cloud Computing", 3, "Amazon Web Services"),
    ("REST APIs", "API Development", 6, "RESTful service design"),
    ("Responsive Design", "Web Development", 7, "Mobile-friendly layouts"),
    ("Webpack", "Build Tools", 4, "Module bundler"),
    ("Jest", "Testing", 5, "JavaScript testing framework"),
    ("Sass/SCSS", "Web Development", 6, "CSS preprocessor"),
    ("Angular", "Web Development", 4, "TypeScript web framework"),
    ("GraphQL", "API Development", 3, "Query language for APIs"),
    ("Redis", "Database", 4, "In-memory data store"),
    ("Kubernetes", "DevOps", 2, "Container orchestration"),
    ("Jenkins", "CI/CD", 3, "Automation server"),
    ("Nginx", "Web Server", 4, "Web server and reverse proxy"),
    ("PostgreSQL", "Database", 5, "Advanced relational database"),
    ("Elasticsearch", "Search", 3, "Search and analytics engine"),
    ("Terraform", "Infrastructure", 2, "Infrastructure as code"),
    ("Microservices", "Architecture", 4, "Distributed system design"),
    ("Go", "Programming", 3, "Google's systems language"),
    ("Rust", "Programming", 2, "Memory-safe systems language"),
    ("Next.js", "Web Development", 5, "React production framework"),
    ("Tailwind CSS", "Web Development", 6, "Utility-first CSS framework"),
    ("Firebase", "Backend as a Service", 4, "Google's app development platform"),
    ("Svelte", "Web Development", 3, "Compile-time web framework"),
    ("WebAssembly", "Web Technology", 2, "High-performance web execution"),
    ("Three.js", "Graphics", 3, "3D graphics library"),
    ("Socket.io", "Real-time", 4, "Real-time communication"),
    ("Blockchain", "Emerging Tech", 2, "Distributed ledger technology"),
    ("Machine Learning", "AI/ML", 3, "Intelligent systems development"),
    ("TensorFlow", "AI/ML", 2, "ML framework by Google"),
    ("Cybersecurity", "Security", 4, "Information security practices"),
    ("DevSecOps", "Security", 3, "Security in DevOps practices"),
    ("AR/VR", "Emerging Tech", 2, "Augmented and Virtual Reality"),
];

const DEMO_DEPENDENCIES: &[(&str, &str, u8, &str)] = &[
    ("html", "css", 6, "HTML basics needed for CSS styling"),
    ("css", "javascript", 5, "Styling knowledge helps with DOM manipulation"),
    ("javascript", "react", 6, "JavaScript fundamentals required for React"),
    ("javascript", "nodejs", 5, "JavaScript knowledge for server-side development"),
    ("linux", "git", 3, "Command line familiarity helps with Git"),
    ("python", "sql", 4, "Programming background helps with database queries"),
    ("javascript", "typescript", 7, "Strong JavaScript foundation for TypeScript"),
    ("html", "vuejs", 6, "HTML knowledge for Vue templates"),
    ("javascript", "vuejs", 6, "JavaScript required for Vue.js"),
    ("nodejs", "expressjs", 4, "Node.js foundation for Express framework"),
    ("nodejs", "mongodb", 3, "Backend knowledge helpful for database integration"),
    ("javascript", "rest-apis", 5, "JavaScript knowledge for API consumption"),
    ("css", "responsive-design", 6, "CSS fundamentals for responsive layouts"),
    ("css", "sassscss", 7, "CSS knowledge required for preprocessors"),
    ("javascript", "webpack", 5, "JavaScript understanding for build tools"),
    ("javascript", "jest", 6, "JavaScript skills needed for testing frameworks"),
    ("typescript", "angular", 6, "TypeScript is primary language for Angular"),
    ("rest-apis", "graphql", 5, "API design knowledge helpful for GraphQL"),
    ("mongodb", "redis", 4, "Database concepts help with caching strategies"),
    ("docker", "kubernetes", 6, "Docker containerization required for Kubernetes"),
    ("git", "jenkins", 4, "Version control knowledge for CI/CD pipelines"),
    ("linux", "nginx", 5, "Linux system knowledge for web server configuration"),
    ("sql", "postgresql", 6, "SQL fundamentals for advanced PostgreSQL features"),
    ("mongodb", "elasticsearch", 4, "NoSQL concepts helpful for search engines"),
    ("aws", "terraform", 4, "Cloud platform knowledge for infrastructure as code"),
    ("rest-apis", "microservices", 6, "API design principles essential for microservices"),
    ("python", "go", 6, "Programming fundamentals help with learning Go"),
    ("python", "rust", 7, "Strong programming background needed for Rust"),
    ("react", "nextjs", 6, "React mastery required for Next.js framework"),
    ("css", "tailwind-css", 6, "CSS understanding helpful for utility-first approach"),
    ("nodejs", "firebase", 4, "Backend concepts helpful for Firebase integration"),
    ("javascript", "svelte", 6, "JavaScript knowledge for Svelte framework"),
    ("rust", "webassembly", 5, "Rust can compile to WebAssembly"),
    ("javascript", "threejs", 7, "Advanced JavaScript for 3D graphics programming"),
    ("nodejs", "socketio", 5, "Node.js backend for real-time communication"),
    ("python", "blockchain", 6, "Programming foundation for blockchain development"),
    ("python", "machine-learning", 7, "Python is primary language for ML development"),
    ("machine-learning", "tensorflow", 5, "ML concepts required for TensorFlow framework"),
    ("linux", "cybersecurity", 6, "System knowledge essential for security practices"),
    ("jenkins", "devsecops", 5, "CI/CD knowledge for security integration"),
    ("threejs", "arvr", 6, "3D graphics foundation for immersive experiences"),
];
