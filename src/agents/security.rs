use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::agents::Agent;

lazy_static! {
    static ref HARDCODED_PASSWORD: Regex = Regex::new(r#"password\s*=\s*['"][^'"]+['"]"#).unwrap();
    static ref SQL_INTERPOLATION: Regex = Regex::new(r"executeQuery\([^)]*\$\{[^}]*\}[^)]*\)").unwrap();
    static ref INNER_HTML: Regex = Regex::new(r"innerHTML|dangerouslySetInnerHTML").unwrap();
    static ref DIRECT_OBJECT_REF: Regex = Regex::new(r"params\.id|req\.params\.id").unwrap();
    static ref WEAK_HASH: Regex = Regex::new(r"MD5|SHA1").unwrap();
}

const SENSITIVE_OPERATIONS: [&str; 4] =
    ["delete_user", "modify_permissions", "access_admin_panel", "export_user_data"];

const FLAGGED_TERMS: [&str; 4] = ["hack", "crack", "exploit", "vulnerability"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityWarning {
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    pub level: String,
    pub issue_type: String,
    pub message: String,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCheckResult {
    pub passed: bool,
    pub warnings: Vec<SecurityWarning>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSecurityResult {
    pub passed: bool,
    pub issues: Vec<SecurityIssue>,
    pub recommendations: Vec<String>,
    pub message: String,
}

/// Security gate: pattern checks over operations, user content and code.
pub struct SecurityAgent;

impl Agent for SecurityAgent {
    fn name(&self) -> &'static str {
        "security"
    }

    fn capabilities(&self) -> &[&'static str] {
        &["security_check", "content_screening", "code_audit"]
    }
}

impl SecurityAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn check_operation_security(&self, operation: &str) -> SecurityCheckResult {
        self.log(&format!("Checking security for operation: {}", operation));

        let mut warnings = Vec::new();

        if SENSITIVE_OPERATIONS.contains(&operation) {
            warnings.push(SecurityWarning {
                level: "high".to_string(),
                message: format!("Operation \"{}\" requires additional verification", operation),
            });
        }
        if operation.contains("linkedin") && !operation.contains("fetch") {
            warnings.push(SecurityWarning {
                level: "medium".to_string(),
                message: "LinkedIn API write operations should be rate-limited".to_string(),
            });
        }

        let message = if warnings.is_empty() {
            "Operation security check passed".to_string()
        } else {
            "Operation allowed with security warnings".to_string()
        };

        SecurityCheckResult { passed: true, warnings, message }
    }

    /// High-level warnings fail the check; medium ones only annotate it.
    pub fn check_content_security(&self, content: &str, hashtags: &[String]) -> SecurityCheckResult {
        self.log("Checking content security");

        let mut warnings = Vec::new();
        let lower = content.to_lowercase();

        if content.contains("<script>") || content.contains("javascript:") {
            warnings.push(SecurityWarning {
                level: "high".to_string(),
                message: "Potential XSS attack detected in content".to_string(),
            });
        }
        if content.contains("SELECT ") && content.contains("FROM ") {
            warnings.push(SecurityWarning {
                level: "high".to_string(),
                message: "Potential SQL injection detected in content".to_string(),
            });
        }
        for term in FLAGGED_TERMS {
            if lower.contains(term) {
                warnings.push(SecurityWarning {
                    level: "medium".to_string(),
                    message: format!("Content contains potentially inappropriate term: \"{}\"", term),
                });
            }
        }
        for hashtag in hashtags {
            let hashtag_lower = hashtag.to_lowercase();
            if FLAGGED_TERMS.iter().any(|term| hashtag_lower.contains(term)) {
                warnings.push(SecurityWarning {
                    level: "medium".to_string(),
                    message: format!("Hashtag contains potentially inappropriate term: \"{}\"", hashtag),
                });
            }
        }

        let high_count = warnings.iter().filter(|w| w.level == "high").count();
        let message = if high_count > 0 {
            "Content failed security check".to_string()
        } else if !warnings.is_empty() {
            "Content passed security check with warnings".to_string()
        } else {
            "Content security check passed".to_string()
        };

        SecurityCheckResult { passed: high_count == 0, warnings, message }
    }

    pub fn check_code_security(&self, code: &str) -> CodeSecurityResult {
        self.log("Checking code security");

        let mut issues = Vec::new();

        if HARDCODED_PASSWORD.is_match(code) {
            issues.push(SecurityIssue {
                level: "high".to_string(),
                issue_type: "hardcoded_credentials".to_string(),
                message: "Hardcoded credentials detected in code".to_string(),
                line: find_line(code, &HARDCODED_PASSWORD),
            });
        }
        if code.contains("executeQuery") && code.contains("${") {
            issues.push(SecurityIssue {
                level: "high".to_string(),
                issue_type: "sql_injection".to_string(),
                message: "Potential SQL injection vulnerability: use parameterized queries".to_string(),
                line: find_line(code, &SQL_INTERPOLATION),
            });
        }
        if INNER_HTML.is_match(code) {
            issues.push(SecurityIssue {
                level: "high".to_string(),
                issue_type: "xss".to_string(),
                message: "Potential XSS vulnerability: use safe alternatives to innerHTML".to_string(),
                line: find_line(code, &INNER_HTML),
            });
        }
        if DIRECT_OBJECT_REF.is_match(code) && !code.contains("authorization") {
            issues.push(SecurityIssue {
                level: "medium".to_string(),
                issue_type: "idor".to_string(),
                message: "Potential insecure direct object reference: add authorization check".to_string(),
                line: find_line(code, &DIRECT_OBJECT_REF),
            });
        }
        if code.contains("req.body") && !code.contains("validate") {
            issues.push(SecurityIssue {
                level: "medium".to_string(),
                issue_type: "input_validation".to_string(),
                message: "Missing input validation for request body".to_string(),
                line: code.lines().position(|l| l.contains("req.body")).map(|i| i + 1),
            });
        }
        if WEAK_HASH.is_match(code) {
            issues.push(SecurityIssue {
                level: "medium".to_string(),
                issue_type: "weak_crypto".to_string(),
                message: "Insecure cryptographic algorithm detected: use SHA-256 or stronger".to_string(),
                line: find_line(code, &WEAK_HASH),
            });
        }

        let recommendations = self.generate_recommendations(&issues);
        let high_count = issues.iter().filter(|i| i.level == "high").count();
        let message = if high_count > 0 {
            "Code failed security check: high-level security issues detected".to_string()
        } else if !issues.is_empty() {
            "Code passed security check with warnings".to_string()
        } else {
            "Code security check passed".to_string()
        };

        CodeSecurityResult { passed: high_count == 0, issues, recommendations, message }
    }

    fn generate_recommendations(&self, issues: &[SecurityIssue]) -> Vec<String> {
        let mut recommendations = Vec::new();
        let has = |t: &str| issues.iter().any(|i| i.issue_type == t);

        if has("hardcoded_credentials") {
            recommendations
                .push("Move credentials to environment variables or a secrets manager".to_string());
        }
        if has("sql_injection") {
            recommendations.push(
                "Replace string concatenation with parameterized queries to prevent SQL injection"
                    .to_string(),
            );
        }
        if has("xss") {
            recommendations.push(
                "Use textContent instead of innerHTML, or the framework's built-in XSS protection"
                    .to_string(),
            );
        }
        if has("idor") {
            recommendations.push("Check record ownership before acting on a client-supplied id".to_string());
        }
        if has("input_validation") {
            recommendations.push("Validate and sanitize all request body fields".to_string());
        }
        if has("weak_crypto") {
            recommendations.push("Use SHA-256 or stronger for hashing, bcrypt for passwords".to_string());
        }

        recommendations
    }
}

impl Default for SecurityAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn find_line(code: &str, pattern: &Regex) -> Option<usize> {
    code.lines().position(|line| pattern.is_match(line)).map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_content_passes() {
        let agent = SecurityAgent::new();
        let result = agent.check_content_security("Excited to share our quarterly results!", &[]);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn script_tag_fails_content_check() {
        let agent = SecurityAgent::new();
        let result = agent.check_content_security("Check this <script>alert(1)</script>", &[]);
        assert!(!result.passed);
        assert_eq!(result.warnings[0].level, "high");
    }

    #[test]
    fn flagged_term_warns_but_passes() {
        let agent = SecurityAgent::new();
        let result = agent.check_content_security("How to exploit new market opportunities", &[]);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].level, "medium");
    }

    #[test]
    fn flagged_hashtag_is_reported() {
        let agent = SecurityAgent::new();
        let result =
            agent.check_content_security("Launch day!", &["#GrowthHack".to_string()]);
        assert!(result.passed);
        assert!(result.warnings.iter().any(|w| w.message.contains("#GrowthHack")));
    }

    #[test]
    fn hardcoded_password_is_high_issue_with_line() {
        let agent = SecurityAgent::new();
        let code = "const a = 1;\nconst password = \"hunter2\";\n";
        let result = agent.check_code_security(code);
        assert!(!result.passed);
        let issue = &result.issues[0];
        assert_eq!(issue.issue_type, "hardcoded_credentials");
        assert_eq!(issue.line, Some(2));
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn sensitive_operation_carries_warning() {
        let agent = SecurityAgent::new();
        let result = agent.check_operation_security("delete_user");
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].level, "high");
    }

    #[test]
    fn linkedin_write_operation_warns_about_rate_limits() {
        let agent = SecurityAgent::new();
        let write = agent.check_operation_security("linkedin_post");
        assert_eq!(write.warnings.len(), 1);
        let read = agent.check_operation_security("linkedin_fetch_profile");
        assert!(read.warnings.is_empty());
    }
}
