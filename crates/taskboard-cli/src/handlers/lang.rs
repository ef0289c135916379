use crate::cli::LangAction;
use crate::output;
use taskboard_core::TaskboardError;
use taskboard_domain::Language;
use taskboard_remote::ClientStateStore;

pub async fn handle(store: &ClientStateStore, action: LangAction) -> anyhow::Result<()> {
    let language = match action {
        LangAction::Get => store.load_or_default().await.language,
        LangAction::Set { code } => {
            let language = Language::parse(&code).ok_or_else(|| {
                TaskboardError::Validation(format!(
                    "Unknown language '{}' (expected en or hi)",
                    code
                ))
            })?;
            store.set_language(language).await?;
            tracing::info!("Language set to {}", language.code());
            language
        }
    };
    output::output_success(serde_json::json!({
        "code": language.code(),
        "name": language.native_name(),
    }));
    Ok(())
}
