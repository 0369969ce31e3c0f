//! Natural-language attendance report produced by an external text-generation API.

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::model::attendance::AttendanceRecord;
use crate::model::user::User;

pub const FALLBACK_REPORT: &str = "Unable to generate the AI report at this time.";

const SYSTEM_INSTRUCTION: &str = "You are a professional HR data analyst at Tros. \
Give concise, actionable insights based on attendance data.";

#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate(&self, users: &[User], records: &[AttendanceRecord]) -> anyhow::Result<String>;
}

/// Asks `provider` for a report. Never fails: errors and empty answers become
/// [`FALLBACK_REPORT`].
pub async fn generate_attendance_insights(
    provider: &dyn InsightProvider,
    users: &[User],
    records: &[AttendanceRecord],
) -> String {
    match provider.generate(users, records).await {
        Ok(report) if !report.trim().is_empty() => report,
        Ok(_) => {
            warn!("Insight provider returned an empty report");
            FALLBACK_REPORT.to_string()
        }
        Err(e) => {
            error!(error = %e, "Insight generation failed");
            FALLBACK_REPORT.to_string()
        }
    }
}

pub fn build_prompt(users: &[User], records: &[AttendanceRecord], language: &str) -> String {
    let employees: Vec<_> = users
        .iter()
        .map(|u| json!({ "name": u.full_name, "dept": u.department }))
        .collect();
    let entries: Vec<_> = records
        .iter()
        .map(|r| {
            let name = users
                .iter()
                .find(|u| u.id == r.user_id)
                .map(|u| u.full_name.as_str());
            json!({
                "user": name,
                "date": r.date,
                "in": r.check_in,
                "out": r.check_out,
            })
        })
        .collect();

    format!(
        "Analyze the following attendance data for the company \"Tros\" and write a \
summary report in {language}.\n\
The report must include:\n\
1. The overall attendance rate.\n\
2. The most disciplined employees.\n\
3. Any concerning patterns (late arrivals, missing check-outs).\n\
4. Recommendations for the HR manager.\n\n\
Data:\n\
Employees: {}\n\
Records: {}\n",
        serde_json::Value::Array(employees),
        serde_json::Value::Array(entries),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

/// Gemini `generateContent` client.
pub struct GeminiInsights {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    language: String,
}

impl GeminiInsights {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            language: config.insights_language.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl InsightProvider for GeminiInsights {
    async fn generate(&self, users: &[User], records: &[AttendanceRecord]) -> anyhow::Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            bail!("GEMINI_API_KEY is not configured");
        };

        let prompt = build_prompt(users, records, &self.language);
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: &prompt }],
            }],
        };

        debug!(model = %self.model, users = users.len(), records = records.len(), "Requesting attendance insights");

        let response: GenerateResponse = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("insight service unreachable")?
            .error_for_status()
            .context("insight service error")?
            .json()
            .await
            .context("insight response parse error")?;

        response
            .text()
            .ok_or_else(|| anyhow!("insight response has no candidates"))
    }
}
