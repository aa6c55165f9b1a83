//! LinkedIn credential maintenance command handlers.

use super::AuthCommands;
use herald::{
    AuthError, AuthErrorKind, HeraldConfig, HeraldResult, LinkedInClient, LinkedInConfig,
    LinkedInOAuth, Secrets,
};
use tracing::warn;

/// Execute an `auth` subcommand.
pub async fn handle_auth_command(
    command: AuthCommands,
    config: &HeraldConfig,
    secrets: &Secrets,
) -> HeraldResult<()> {
    match command {
        AuthCommands::Url => {
            let oauth = oauth_app(secrets, false)?;
            println!("Open this URL, approve access, then run");
            println!("`herald auth exchange --code <code>` with the code from the redirect:");
            println!();
            println!("{}", oauth.authorization_url()?);
        }

        AuthCommands::Exchange { code } => {
            let oauth = oauth_app(secrets, true)?;
            let token = oauth.exchange_code(code.trim()).await?;
            println!("Access token (valid for {} days):", token.expires_in_days());
            println!();
            println!("LINKEDIN_ACCESS_TOKEN={}", token.access_token());
            if let Some(refresh) = token.refresh_token() {
                println!("Refresh token: {}", refresh);
            }
            println!();
            println!("Store it in .env or your scheduler's secret store.");
        }

        AuthCommands::Whoami => {
            let token = secrets
                .linkedin_access_token()
                .as_deref()
                .ok_or_else(|| missing("LINKEDIN_ACCESS_TOKEN"))?;
            let linkedin = LinkedInConfig::builder()
                .access_token(token)
                .api_base(config.linkedin().api_base())
                .build()
                .map_err(|e| AuthError::new(AuthErrorKind::Parse(e.to_string())))?;
            let client = LinkedInClient::new(linkedin);

            let info = client.userinfo().await?;
            println!("Token is valid.");
            println!("Name:       {}", info.name().as_deref().unwrap_or("unknown"));
            if let Some(email) = info.email() {
                println!("Email:      {}", email);
            }
            println!("Person URN: {}", info.person_urn());
            if let Some(author) = config.linkedin().author_urn() {
                println!("Posting as: {}", author);
            }

            match client.organizations().await {
                Ok(orgs) if !orgs.is_empty() => {
                    println!("Organizations:");
                    for acl in orgs {
                        println!(
                            "  {} ({})",
                            acl.organization(),
                            acl.role().as_deref().unwrap_or("no role")
                        );
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Could not list organizations"),
            }
        }
    }

    Ok(())
}

fn oauth_app(secrets: &Secrets, need_secret: bool) -> HeraldResult<LinkedInOAuth> {
    let client_id = secrets
        .linkedin_client_id()
        .as_deref()
        .ok_or_else(|| missing("LINKEDIN_CLIENT_ID"))?;
    let client_secret = match secrets.linkedin_client_secret().as_deref() {
        Some(secret) => secret,
        None if need_secret => return Err(missing("LINKEDIN_CLIENT_SECRET").into()),
        None => "",
    };

    LinkedInOAuth::builder()
        .client_id(client_id)
        .client_secret(client_secret)
        .build()
        .map_err(|e| AuthError::new(AuthErrorKind::Parse(e.to_string())).into())
}

fn missing(name: &str) -> AuthError {
    AuthError::new(AuthErrorKind::MissingCredential(format!("{} not set", name)))
}
