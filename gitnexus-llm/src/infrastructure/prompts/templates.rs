/// System instruction sent alongside every analysis prompt
pub const SYSTEM_PROMPT: &str = "You are an expert Senior Software Architect specializing in code analysis. You must output strictly valid JSON matching the requested schema. Do not output markdown code blocks, just the raw JSON object.";

pub const ANALYSIS_INTRO: &str = r#"# REPOSITORY HEALTH ANALYSIS

You are a principal engineer reviewing a GitHub repository for architecture, code quality, security and maintainability. Base every observation on the context below and say so when the evidence is thin."#;

/// Top-level keys of the report schema, in the order they are documented
pub const SCHEMA_FIELDS: &[&str] = &[
    "summary",
    "projectType",
    "maturity",
    "techStack",
    "scores",
    "insights",
    "architecture",
    "dependencies",
    "quickWins",
    "longTermImprovements",
];

/// Keys of the `scores` object
pub const SCORE_FIELDS: &[&str] = &[
    "overall",
    "codeQuality",
    "security",
    "maintainability",
    "documentation",
    "testing",
    "performance",
    "developerExperience",
];

pub const ANALYSIS_INSTRUCTIONS: &str = r#"# ANALYSIS INSTRUCTIONS

1. Summary: three or four sentences on what the project does, who it is for, and how production-ready it looks.
2. Technology stack: list frameworks, languages, storage, build and CI tooling you can see, with versions when the manifests show them.
3. Architecture: classify the structure (monolith, modular, services, library) and name its main components.
4. Scores: rate each dimension from 0 to 100. Be rigorous; 50 is average.
5. Insights: give 12 to 18 specific findings. Reference file paths or patterns as evidence. Each insight has a title, a two to three sentence description, a type and a priority.
6. Dependencies: judge currency, known vulnerability exposure and unusually heavy packages.
7. Improvements: list quick wins that take under a day, then longer-term improvements.

# OUTPUT FORMAT

Respond with ONLY a JSON object (no markdown, no commentary) with exactly these fields:

{
  "summary": "string",
  "projectType": "web-app" | "api" | "library" | "cli" | "mobile" | "desktop" | "other",
  "maturity": "prototype" | "alpha" | "beta" | "production" | "mature",
  "techStack": ["string"],
  "scores": {
    "overall": 0-100,
    "codeQuality": 0-100,
    "security": 0-100,
    "maintainability": 0-100,
    "documentation": 0-100,
    "testing": 0-100,
    "performance": 0-100,
    "developerExperience": 0-100
  },
  "insights": [
    {
      "type": "strength" | "weakness" | "suggestion" | "security",
      "title": "string",
      "description": "string",
      "priority": "low" | "medium" | "high" | "critical"
    }
  ],
  "architecture": [
    {
      "name": "string",
      "type": "frontend" | "backend" | "database" | "service" | "infra" | "tool",
      "description": "string"
    }
  ],
  "dependencies": {
    "status": "healthy" | "warning" | "critical",
    "outdated": 0,
    "vulnerabilities": 0,
    "heaviest": ["string"],
    "suggestions": ["string"]
  },
  "quickWins": ["string"],
  "longTermImprovements": ["string"]
}

Be critical but constructive. Every insight should be something a developer can act on."#;
