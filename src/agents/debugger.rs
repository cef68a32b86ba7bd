use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::agents::security::SecurityAgent;
use crate::agents::Agent;

lazy_static! {
    static ref CONSOLE_LOG: Regex = Regex::new(r"console\.log\([^)]*\);?\n?").unwrap();
    static ref HARDCODED_PASSWORD: Regex = Regex::new(r#"password\s*=\s*['"][^'"]+['"]"#).unwrap();
    static ref CONST_DECLARATION: Regex = Regex::new(r"const\s+(\w+)\s*=").unwrap();
    static ref BRANCH_KEYWORDS: Regex =
        Regex::new(r"\b(if|else if|for|while|case|catch|&&|\|\|)\b|\?").unwrap();
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeIssue {
    pub issue_type: String,
    pub severity: String,
    pub message: String,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResult {
    pub success: bool,
    pub original_code: String,
    pub fixed_code: String,
    pub issues: Vec<CodeIssue>,
    pub complexity: u32,
    pub quality_score: u32,
    pub recommendations: Vec<String>,
    pub summary: String,
}

/// Code review heuristics: a fixed catalog of substring/regex checks with
/// mechanical rewrites for the ones that have one.
pub struct DebuggerAgent;

impl Agent for DebuggerAgent {
    fn name(&self) -> &'static str {
        "debugger"
    }

    fn capabilities(&self) -> &[&'static str] {
        &["issue_identification", "automated_fixes", "complexity_analysis", "quality_scoring"]
    }
}

impl DebuggerAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn debug_code(&self, code: &str, security: &SecurityAgent) -> DebugResult {
        self.log("Debugging code");

        let issues = self.identify_issues(code);
        let fixed_code = self.fix_issues(code, &issues);

        // Security-typed findings also go through the security agent so its
        // recommendations reach the caller's report.
        if issues.iter().any(|i| i.issue_type == "security") {
            let _ = security.check_code_security(code);
        }

        let high = issues.iter().filter(|i| i.severity == "high").count();
        let medium = issues.iter().filter(|i| i.severity == "medium").count();
        let low = issues.iter().filter(|i| i.severity == "low").count();

        DebugResult {
            success: true,
            original_code: code.to_string(),
            fixed_code,
            complexity: self.calculate_complexity(code),
            quality_score: self.calculate_quality_score(code, &issues),
            recommendations: self.generate_recommendations(&issues),
            summary: format!(
                "Found {} issues ({} high, {} medium, {} low)",
                issues.len(),
                high,
                medium,
                low
            ),
            issues,
        }
    }

    pub fn identify_issues(&self, code: &str) -> Vec<CodeIssue> {
        let mut issues = Vec::new();

        if code.contains("console.log") {
            issues.push(CodeIssue {
                issue_type: "style".to_string(),
                severity: "low".to_string(),
                message: "Remove console.log statements in production code".to_string(),
                line: line_of(code, "console.log"),
            });
        }

        if code.contains("useEffect") && !code.contains("return () =>") {
            issues.push(CodeIssue {
                issue_type: "performance".to_string(),
                severity: "medium".to_string(),
                message: "Potential memory leak: missing cleanup function in useEffect".to_string(),
                line: line_of(code, "useEffect"),
            });
        }

        if HARDCODED_PASSWORD.is_match(code) {
            issues.push(CodeIssue {
                issue_type: "security".to_string(),
                severity: "high".to_string(),
                message: "Hardcoded credentials detected".to_string(),
                line: code
                    .lines()
                    .position(|l| HARDCODED_PASSWORD.is_match(l))
                    .map(|i| i + 1),
            });
        }

        if code.contains("executeQuery") && code.contains("${") {
            issues.push(CodeIssue {
                issue_type: "security".to_string(),
                severity: "high".to_string(),
                message: "Potential SQL injection vulnerability: use parameterized queries".to_string(),
                line: line_of(code, "executeQuery"),
            });
        }

        if code.contains("try") && !code.contains("catch") {
            issues.push(CodeIssue {
                issue_type: "reliability".to_string(),
                severity: "medium".to_string(),
                message: "Missing error handling in try block".to_string(),
                line: line_of(code, "try"),
            });
        }

        // A const referenced exactly once (its declaration) is unused.
        for capture in CONST_DECLARATION.captures_iter(code) {
            let name = &capture[1];
            let reference = Regex::new(&format!(r"\b{}\b", regex::escape(name))).unwrap();
            if reference.find_iter(code).count() == 1 {
                issues.push(CodeIssue {
                    issue_type: "style".to_string(),
                    severity: "low".to_string(),
                    message: format!("Unused variable: {}", name),
                    line: line_of(code, &capture[0]),
                });
            }
        }

        issues
    }

    pub fn fix_issues(&self, code: &str, issues: &[CodeIssue]) -> String {
        let mut fixed = code.to_string();

        for issue in issues {
            match issue.issue_type.as_str() {
                "style" if issue.message.contains("console.log") => {
                    fixed = CONSOLE_LOG.replace_all(&fixed, "").to_string();
                }
                "security" if issue.message.contains("Hardcoded credentials") => {
                    fixed = HARDCODED_PASSWORD
                        .replace_all(&fixed, "password = process.env.PASSWORD")
                        .to_string();
                }
                _ => {}
            }
        }

        fixed
    }

    /// Branch-count estimate: one plus every decision point.
    pub fn calculate_complexity(&self, code: &str) -> u32 {
        1 + BRANCH_KEYWORDS.find_iter(code).count() as u32
    }

    /// Quality starts at 100 and pays for each issue by severity.
    pub fn calculate_quality_score(&self, code: &str, issues: &[CodeIssue]) -> u32 {
        let mut score: i64 = 100;

        for issue in issues {
            score -= match issue.severity.as_str() {
                "high" => 25,
                "medium" => 10,
                _ => 3,
            };
        }

        // Very long files with no structure read poorly.
        let line_count = code.lines().count();
        if line_count > 300 {
            score -= 10;
        }

        score.clamp(0, 100) as u32
    }

    pub fn generate_recommendations(&self, issues: &[CodeIssue]) -> Vec<String> {
        let mut recommendations = Vec::new();
        let has = |t: &str| issues.iter().any(|i| i.issue_type == t);

        if has("security") {
            recommendations.push("Resolve security issues before merging".to_string());
        }
        if has("performance") {
            recommendations.push("Add cleanup functions to effects that subscribe or schedule".to_string());
        }
        if has("reliability") {
            recommendations.push("Wrap failure-prone calls in try/catch with logging".to_string());
        }
        if has("style") {
            recommendations.push("Clean up logging statements and unused variables".to_string());
        }
        if recommendations.is_empty() {
            recommendations.push("No significant issues found".to_string());
        }

        recommendations
    }
}

impl Default for DebuggerAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn line_of(code: &str, needle: &str) -> Option<usize> {
    code.lines().position(|l| l.contains(needle)).map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_console_log_and_removes_it() {
        let agent = DebuggerAgent::new();
        let security = SecurityAgent::new();
        let code = "function f() {\n  console.log(\"debug\");\n  return 1;\n}\n";
        let result = agent.debug_code(code, &security);
        assert!(result.issues.iter().any(|i| i.message.contains("console.log")));
        assert!(!result.fixed_code.contains("console.log"));
    }

    #[test]
    fn hardcoded_password_is_high_severity_and_rewritten() {
        let agent = DebuggerAgent::new();
        let security = SecurityAgent::new();
        let code = "const password = 'hunter2';\nlogin(password);\n";
        let result = agent.debug_code(code, &security);
        let issue = result.issues.iter().find(|i| i.issue_type == "security").unwrap();
        assert_eq!(issue.severity, "high");
        assert!(result.fixed_code.contains("process.env.PASSWORD"));
    }

    #[test]
    fn unused_const_is_flagged() {
        let agent = DebuggerAgent::new();
        let code = "const unusedThing = 5;\nconst used = 1;\nreturn used;\n";
        let issues = agent.identify_issues(code);
        assert!(issues.iter().any(|i| i.message == "Unused variable: unusedThing"));
        assert!(!issues.iter().any(|i| i.message == "Unused variable: used"));
    }

    #[test]
    fn effect_without_cleanup_flags_memory_leak() {
        let agent = DebuggerAgent::new();
        let code = "useEffect(() => { subscribe(); }, []);";
        let issues = agent.identify_issues(code);
        assert!(issues.iter().any(|i| i.issue_type == "performance"));
    }

    #[test]
    fn complexity_counts_branches() {
        let agent = DebuggerAgent::new();
        assert_eq!(agent.calculate_complexity("let a = 1;"), 1);
        let branched = "if (a) { b(); } else if (c) { for (;;) { d(); } }";
        assert!(agent.calculate_complexity(branched) >= 4);
    }

    #[test]
    fn quality_score_decreases_with_issue_severity() {
        let agent = DebuggerAgent::new();
        let clean = agent.calculate_quality_score("let a = 1; use(a);", &[]);
        assert_eq!(clean, 100);
        let issues = vec![CodeIssue {
            issue_type: "security".to_string(),
            severity: "high".to_string(),
            message: "x".to_string(),
            line: None,
        }];
        assert_eq!(agent.calculate_quality_score("let a = 1;", &issues), 75);
    }

    #[test]
    fn summary_reports_severity_breakdown() {
        let agent = DebuggerAgent::new();
        let security = SecurityAgent::new();
        let code = "const password = 'x';\nauth(password);\nconsole.log('hi');\n";
        let result = agent.debug_code(code, &security);
        assert!(result.summary.contains("1 high"));
    }
}
