/// MCP server exposing symptom retrieval.
///
/// Exposes three tools:
/// - `analyze_symptoms`: Rank conditions against a free-text symptom description
/// - `get_condition`: Look up one condition by key
/// - `list_conditions`: List every condition in the knowledge base
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::guidance;
use symptom_core::RetrievalEngine;
use symptom_core::api::{
    AnalyzeSymptomsParams, AnalyzeSymptomsResponse, ConditionDetailResponse,
    ConditionListResponse, GetConditionParams,
};

#[derive(Clone)]
pub struct SymptomGuidanceServer {
    engine: Arc<RetrievalEngine>,
    config: Arc<Config>,
    tool_router: ToolRouter<SymptomGuidanceServer>,
}

impl SymptomGuidanceServer {
    pub fn new(engine: Arc<RetrievalEngine>, config: Config) -> Self {
        Self {
            engine,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl SymptomGuidanceServer {
    #[tool(description = "Match a free-text symptom description against the health condition knowledge base. Returns ranked matches with keyword-overlap scores and preventive guidance for the top match. Informational only, not a diagnosis.")]
    async fn analyze_symptoms(
        &self,
        Parameters(params): Parameters<AnalyzeSymptomsParams>,
    ) -> Result<Json<AnalyzeSymptomsResponse>, String> {
        guidance::analyze_symptoms(&self.engine, &self.config, &params.symptoms, params.limit)
            .map(Json)
    }

    #[tool(description = "Get the full preventive guidance for one condition by key (e.g. 'common_cold', 'influenza').")]
    async fn get_condition(
        &self,
        Parameters(params): Parameters<GetConditionParams>,
    ) -> Result<Json<ConditionDetailResponse>, String> {
        guidance::condition_detail(self.engine.knowledge_base(), &params.key).map(Json)
    }

    #[tool(description = "List every condition covered by the knowledge base, in knowledge base order.")]
    async fn list_conditions(&self) -> Result<Json<ConditionListResponse>, String> {
        Ok(Json(guidance::list_conditions(self.engine.knowledge_base())))
    }
}

#[tool_handler]
impl ServerHandler for SymptomGuidanceServer {
    fn get_info(&self) -> ServerInfo {
        let conditions = self.engine.knowledge_base().condition_names().join(", ");
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "symptom-guidance".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "{disclaimer}\n\nSymptom guidance MCP server. Use analyze_symptoms with the \
                 user's own description of their symptoms, get_condition for one condition's \
                 advice, and list_conditions to see coverage. Always show the disclaimer \
                 returned with each response. Current coverage: {conditions}.",
                disclaimer = guidance::DISCLAIMER,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use symptom_core::{KnowledgeBase, RetrievalEngine};

    use super::SymptomGuidanceServer;
    use crate::config::Config;
    use crate::guidance::DISCLAIMER;
    use rmcp::ServerHandler;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = SymptomGuidanceServer::tool_router().list_all();
        for name in ["analyze_symptoms", "get_condition", "list_conditions"] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[test]
    fn instructions_carry_disclaimer_and_coverage() {
        let engine = Arc::new(RetrievalEngine::new(KnowledgeBase::builtin().unwrap()));
        let server = SymptomGuidanceServer::new(engine, Config::default());
        let instructions = server.get_info().instructions.unwrap();
        assert!(instructions.starts_with(DISCLAIMER));
        assert!(instructions.contains("Common Cold"));
        assert!(instructions.contains("Gastrointestinal Discomfort"));
    }
}
