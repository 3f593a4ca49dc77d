use common_auth::AuthContext;
use serde::Serialize;

/// Simple response for the HTTP v2 authorizer protocol. A denial carries no
/// context and no reason, so nothing about validation internals leaks to
/// unauthenticated callers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub is_authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<AuthContext>,
}

impl SimpleResponse {
    pub fn allow(context: AuthContext) -> Self {
        Self {
            is_authorized: true,
            context: Some(context),
        }
    }

    pub fn deny() -> Self {
        Self {
            is_authorized: false,
            context: None,
        }
    }
}

/// IAM-style policy response for the legacy REST authorizer protocol.
/// Only ever built for an allow; the legacy protocol signals denial as an
/// invocation failure instead of a Deny document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    pub context: AuthContext,
}

#[derive(Debug, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: &'static str,
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Serialize)]
pub struct PolicyStatement {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "Effect")]
    pub effect: Effect,
    #[serde(rename = "Resource")]
    pub resource: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl PolicyResponse {
    pub fn allow(context: AuthContext, resource: String) -> Self {
        Self {
            principal_id: context.user_id.clone(),
            policy_document: PolicyDocument {
                version: "2012-10-17",
                statement: vec![PolicyStatement {
                    action: "execute-api:Invoke",
                    effect: Effect::Allow,
                    resource,
                }],
            },
            context,
        }
    }
}

/// Derives the stage-scoped wildcard resource from a method ARN of the form
/// `arn:aws:execute-api:{region}:{account}:{apiId}/{stage}/{method}/{path}`,
/// authorizing every method and path under that stage.
pub fn stage_resource_pattern(method_arn: &str) -> Option<String> {
    let parts: Vec<&str> = method_arn.splitn(6, ':').collect();
    if parts.len() != 6 {
        return None;
    }

    let gateway_prefix = parts[..5].join(":");
    let mut path = parts[5].split('/');
    let api_id = path.next().filter(|segment| !segment.is_empty())?;
    let stage = path.next().filter(|segment| !segment.is_empty())?;

    Some(format!("{gateway_prefix}:{api_id}:{stage}/*"))
}
