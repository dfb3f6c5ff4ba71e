use ::common::api::{AuthenticationType, ContentType, EntityId, HttpMethod};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct OutputFormatArgs {
    /// Emit JSON instead of a table.
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,
    /// Emit YAML instead of a table.
    #[arg(long, conflicts_with = "json")]
    pub yaml: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
    Yaml,
}

impl OutputFormatArgs {
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.yaml {
            OutputMode::Yaml
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    /// Resource identifier.
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Resource identifier.
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum AuthTypeArg {
    Oauth2,
    Basic,
    Bearer,
    ApiKey,
    None,
}

impl From<AuthTypeArg> for AuthenticationType {
    fn from(arg: AuthTypeArg) -> Self {
        match arg {
            AuthTypeArg::Oauth2 => AuthenticationType::OAuth2,
            AuthTypeArg::Basic => AuthenticationType::Basic,
            AuthTypeArg::Bearer => AuthenticationType::Bearer,
            AuthTypeArg::ApiKey => AuthenticationType::ApiKey,
            AuthTypeArg::None => AuthenticationType::None,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum ContentTypeArg {
    Json,
    Xml,
    Form,
    Multipart,
    Text,
}

impl From<ContentTypeArg> for ContentType {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::Json => ContentType::ApplicationJson,
            ContentTypeArg::Xml => ContentType::ApplicationXml,
            ContentTypeArg::Form => ContentType::ApplicationFormUrlencoded,
            ContentTypeArg::Multipart => ContentType::MultipartFormData,
            ContentTypeArg::Text => ContentType::TextPlain,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum HttpMethodArg {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<HttpMethodArg> for HttpMethod {
    fn from(arg: HttpMethodArg) -> Self {
        match arg {
            HttpMethodArg::Get => HttpMethod::Get,
            HttpMethodArg::Post => HttpMethod::Post,
            HttpMethodArg::Put => HttpMethod::Put,
            HttpMethodArg::Delete => HttpMethod::Delete,
            HttpMethodArg::Patch => HttpMethod::Patch,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum CompletionShell {
    Bash,
    Fish,
    Zsh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_mode_prefers_json_then_yaml() {
        let args = OutputFormatArgs {
            json: true,
            yaml: false,
        };
        assert_eq!(args.mode(), OutputMode::Json);

        let args = OutputFormatArgs {
            json: false,
            yaml: true,
        };
        assert_eq!(args.mode(), OutputMode::Yaml);

        let args = OutputFormatArgs {
            json: false,
            yaml: false,
        };
        assert_eq!(args.mode(), OutputMode::Table);
    }

    #[test]
    fn wire_enum_args_convert_to_api() {
        let auth: AuthenticationType = AuthTypeArg::ApiKey.into();
        assert_eq!(auth.as_str(), "API_KEY");
        let auth: AuthenticationType = AuthTypeArg::Oauth2.into();
        assert_eq!(auth.as_str(), "OAUTH2");
        let content: ContentType = ContentTypeArg::Form.into();
        assert_eq!(content.as_str(), "APPLICATION_FORM_URLENCODED");
        let method: HttpMethod = HttpMethodArg::Patch.into();
        assert_eq!(method.as_str(), "PATCH");
    }
}
