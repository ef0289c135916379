use crate::context::CliContext;
use crate::handlers::surfaced;
use crate::output;
use taskboard_domain::{Credentials, SignUpForm, SignUpOutcome};

pub async fn signup(
    ctx: &mut CliContext,
    full_name: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let form = SignUpForm {
        full_name,
        email,
        password,
    };
    let mut flow = ctx.auth_flow();
    let outcome = flow
        .sign_up(&form)
        .await
        .map_err(|e| surfaced(flow.notices(), e))?;

    // Signing up never signs in; the next step is always `login`.
    let next = outcome.next_route().path();
    let data = match outcome {
        SignUpOutcome::Registered { user } => serde_json::json!({
            "status": "registered",
            "user": user,
            "next": next,
        }),
        SignUpOutcome::VerificationSent => serde_json::json!({
            "status": "verification_sent",
            "email": form.email.trim(),
            "next": next,
        }),
    };
    output::output_success(data);
    Ok(())
}

pub async fn login(ctx: &mut CliContext, email: String, password: String) -> anyhow::Result<()> {
    let mut flow = ctx.auth_flow();
    let session = flow
        .sign_in(&Credentials::new(email, password))
        .await
        .map_err(|e| surfaced(flow.notices(), e))?;
    ctx.remember(Some(session.clone())).await?;
    output::output_success(serde_json::json!({
        "user": session.user,
        "expires_at": session.expires_at,
    }));
    Ok(())
}

pub async fn logout(ctx: &mut CliContext) -> anyhow::Result<()> {
    let signed_in = match ctx.state.session.clone() {
        Some(session) => {
            ctx.auth_flow().sign_out(&session).await;
            true
        }
        None => false,
    };
    ctx.remember(None).await?;
    output::output_success(serde_json::json!({ "signed_out": signed_in }));
    Ok(())
}

pub async fn whoami(ctx: &mut CliContext) -> anyhow::Result<()> {
    let session = ctx.session().await?;
    let user = ctx.auth_flow().current_user(&session).await?;
    let profile = ctx.backend.profiles.get_profile(&session).await?;
    output::output_success(serde_json::json!({
        "id": user.id,
        "email": user.email,
        "full_name": profile.as_ref().and_then(|p| p.full_name.clone()),
        "initials": profile.as_ref().and_then(|p| p.initials()),
    }));
    Ok(())
}
