#![deny(missing_docs)]

//! # Builtin Tools
//!
//! The fixed catalog of tools implemented natively by the platform. The
//! catalog is `static` data: it is built at compile time and never written,
//! so lookups need no synchronisation.

use serde::{Serialize, Serializer};

/// A catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuiltinCategory {
    /// Category key referenced by providers.
    pub category: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon file name.
    pub icon: &'static str,
}

/// An argument the LLM fills in when calling the tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuiltinInput {
    /// Argument name.
    pub name: &'static str,
    /// Description shown to the LLM.
    pub description: &'static str,
    /// Whether the argument is mandatory.
    pub required: bool,
    /// Primitive type.
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Kind of a user-configured tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Numeric value, optionally bounded by `min`/`max`.
    Number,
    /// Free text.
    String,
    /// On/off switch.
    Boolean,
    /// One of `options`.
    Select,
}

/// One choice of a [`ParamKind::Select`] parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamOption {
    /// Stored value.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// A parameter configured by the user when attaching the tool to an app.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuiltinParam {
    /// Parameter name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Value kind.
    #[serde(rename = "type")]
    pub kind: ParamKind,
    /// Whether a value must be configured.
    pub required: bool,
    /// Default value, `null` when absent.
    pub default: Option<&'static str>,
    /// Lower bound for numbers, `null` when absent.
    pub min: Option<f64>,
    /// Upper bound for numbers, `null` when absent.
    pub max: Option<f64>,
    /// Help text, `""` when absent.
    #[serde(serialize_with = "empty_when_none")]
    pub help: Option<&'static str>,
    /// Choices for select parameters.
    pub options: &'static [ParamOption],
}

fn empty_when_none<S: Serializer>(value: &Option<&'static str>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.unwrap_or(""))
}

/// A builtin tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuiltinTool {
    /// Tool name, unique within its provider.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Description.
    pub description: &'static str,
    /// LLM-facing arguments.
    pub inputs: &'static [BuiltinInput],
    /// User-configured parameters.
    pub params: &'static [BuiltinParam],
}

/// A builtin tool provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinProvider {
    /// Provider name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Description.
    pub description: &'static str,
    /// Category key, see [`BuiltinCategory`].
    pub category: &'static str,
    /// Background colour of the icon tile.
    pub background: &'static str,
    /// Icon file name.
    pub icon: &'static str,
    /// Creation time, epoch seconds.
    pub created_at: i64,
    /// Tools of this provider.
    pub tools: &'static [BuiltinTool],
}

const fn input(name: &'static str, description: &'static str, required: bool) -> BuiltinInput {
    BuiltinInput {
        name,
        description,
        required,
        kind: "string",
    }
}

const QUERY_INPUT: [BuiltinInput; 1] = [input("query", "the search keywords", true)];

static CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        category: "search",
        name: "Search",
        icon: "search.svg",
    },
    BuiltinCategory {
        category: "image",
        name: "Image",
        icon: "image.svg",
    },
    BuiltinCategory {
        category: "weather",
        name: "Weather",
        icon: "weather.svg",
    },
    BuiltinCategory {
        category: "tool",
        name: "Utilities",
        icon: "tool.svg",
    },
];

static PROVIDERS: &[BuiltinProvider] = &[
    BuiltinProvider {
        name: "time",
        label: "Time",
        description: "Utilities for reading the current date and time",
        category: "tool",
        background: "#E5E7EB",
        icon: "time.svg",
        created_at: 1721460914,
        tools: &[BuiltinTool {
            name: "current_time",
            label: "Current time",
            description: "Returns the current time formatted as an ISO 8601 string",
            inputs: &[],
            params: &[],
        }],
    },
    BuiltinProvider {
        name: "dalle",
        label: "DALLE",
        description: "DALLE turns a text prompt into an image",
        category: "image",
        background: "#E5E7EB",
        icon: "dalle.png",
        created_at: 1721460914,
        tools: &[BuiltinTool {
            name: "dalle3",
            label: "DALLE-3 drawing",
            description: "Generates an image from a text prompt with DALLE-3",
            inputs: &[input("query", "a text prompt describing the image to generate", true)],
            params: &[
                BuiltinParam {
                    name: "size",
                    label: "Image size",
                    kind: ParamKind::Select,
                    required: true,
                    default: Some("1024x1024"),
                    min: None,
                    max: None,
                    help: None,
                    options: &[
                        ParamOption {
                            value: "1024x1024",
                            label: "1024x1024",
                        },
                        ParamOption {
                            value: "1792x1024",
                            label: "1792x1024",
                        },
                        ParamOption {
                            value: "1024x1792",
                            label: "1024x1792",
                        },
                    ],
                },
                BuiltinParam {
                    name: "style",
                    label: "Image style",
                    kind: ParamKind::Select,
                    required: true,
                    default: Some("vivid"),
                    min: None,
                    max: None,
                    help: Some("vivid produces hyper-real images, natural produces more muted ones"),
                    options: &[
                        ParamOption {
                            value: "vivid",
                            label: "Vivid",
                        },
                        ParamOption {
                            value: "natural",
                            label: "Natural",
                        },
                    ],
                },
            ],
        }],
    },
    BuiltinProvider {
        name: "duckduckgo",
        label: "DuckDuckGo",
        description: "Privacy focused web search",
        category: "search",
        background: "#FFFFFF",
        icon: "duckduckgo.svg",
        created_at: 1721460914,
        tools: &[BuiltinTool {
            name: "duckduckgo_search",
            label: "DuckDuckGo search",
            description: "Searches the web and returns the top results",
            inputs: &QUERY_INPUT,
            params: &[],
        }],
    },
    BuiltinProvider {
        name: "wikipedia",
        label: "Wikipedia",
        description: "The free encyclopedia",
        category: "search",
        background: "#FFFFFF",
        icon: "wikipedia.svg",
        created_at: 1721460914,
        tools: &[BuiltinTool {
            name: "wikipedia_search",
            label: "Wikipedia search",
            description: "Searches Wikipedia and returns article summaries",
            inputs: &QUERY_INPUT,
            params: &[BuiltinParam {
                name: "top_k_results",
                label: "Result count",
                kind: ParamKind::Number,
                required: false,
                default: Some("3"),
                min: Some(1.0),
                max: Some(10.0),
                help: Some("How many articles to summarise"),
                options: &[],
            }],
        }],
    },
    BuiltinProvider {
        name: "gaode",
        label: "Gaode",
        description: "Location services from the Gaode open platform",
        category: "weather",
        background: "#E0F2FE",
        icon: "gaode.png",
        created_at: 1721460914,
        tools: &[
            BuiltinTool {
                name: "gaode_weather",
                label: "Weather forecast",
                description: "Looks up the weather forecast for a city",
                inputs: &[input("city", "name of the city, for example Beijing", true)],
                params: &[],
            },
            BuiltinTool {
                name: "gaode_ip",
                label: "IP location",
                description: "Resolves an IP address to a city",
                inputs: &[input("ip", "the IP address to look up; defaults to the caller", false)],
                params: &[],
            },
        ],
    },
];

/// Provider with its tools, as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltinProviderView {
    /// Provider name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Description.
    pub description: &'static str,
    /// Category key.
    pub category: &'static str,
    /// Icon tile background.
    pub background: &'static str,
    /// Icon file name.
    pub icon: &'static str,
    /// Tools.
    pub tools: &'static [BuiltinTool],
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

/// Provider fields embedded in [`SpecificBuiltinTool`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltinProviderBrief {
    /// Provider name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Description.
    pub description: &'static str,
    /// Category key.
    pub category: &'static str,
    /// Icon tile background.
    pub background: &'static str,
}

/// One tool together with its provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificBuiltinTool {
    /// Owning provider.
    pub provider: BuiltinProviderBrief,
    /// Tool name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Description.
    pub description: &'static str,
    /// LLM-facing arguments.
    pub inputs: &'static [BuiltinInput],
    /// User-configured parameters.
    pub params: &'static [BuiltinParam],
}

/// All catalog categories.
pub fn builtin_tool_categories() -> &'static [BuiltinCategory] {
    CATEGORIES
}

/// Every provider with its tools.
pub fn all_builtin_tools() -> Vec<BuiltinProviderView> {
    PROVIDERS
        .iter()
        .map(|p| BuiltinProviderView {
            name: p.name,
            label: p.label,
            description: p.description,
            category: p.category,
            background: p.background,
            icon: p.icon,
            tools: p.tools,
            created_at: p.created_at * 1000,
        })
        .collect()
}

/// Looks up one tool by provider and tool name.
pub fn specific_builtin_tool(provider_name: &str, tool_name: &str) -> Option<SpecificBuiltinTool> {
    let provider = PROVIDERS.iter().find(|p| p.name == provider_name)?;
    let tool = provider.tools.iter().find(|t| t.name == tool_name)?;
    Some(SpecificBuiltinTool {
        provider: BuiltinProviderBrief {
            name: provider.name,
            label: provider.label,
            description: provider.description,
            category: provider.category,
            background: provider.background,
        },
        name: tool.name,
        label: tool.label,
        description: tool.description,
        inputs: tool.inputs,
        params: tool.params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_every_provider_has_a_known_category() {
        let categories: HashSet<_> = builtin_tool_categories().iter().map(|c| c.category).collect();
        for provider in all_builtin_tools() {
            assert!(categories.contains(provider.category), "{}", provider.name);
        }
    }

    #[test]
    fn test_tool_names_are_unique_per_provider() {
        for provider in all_builtin_tools() {
            let names: HashSet<_> = provider.tools.iter().map(|t| t.name).collect();
            assert_eq!(names.len(), provider.tools.len());
        }
    }

    #[test]
    fn test_created_at_is_milliseconds() {
        let providers = all_builtin_tools();
        assert_eq!(providers[0].created_at, 1721460914000);
        let value = serde_json::to_value(&providers[0]).unwrap();
        assert_eq!(value["createdAt"], json!(1721460914000_i64));
    }

    #[test]
    fn test_specific_tool_lookup() {
        let tool = specific_builtin_tool("dalle", "dalle3").unwrap();
        assert_eq!(tool.provider.name, "dalle");
        assert_eq!(tool.inputs.len(), 1);

        assert!(specific_builtin_tool("dalle", "missing").is_none());
        assert!(specific_builtin_tool("missing", "dalle3").is_none());
    }

    #[test]
    fn test_specific_tool_fields() {
        let tool = specific_builtin_tool("time", "current_time").unwrap();
        let value = serde_json::to_value(&tool).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["description", "inputs", "label", "name", "params", "provider"]);
    }

    #[test]
    fn test_absent_param_fields_serialize_as_defaults() {
        let tool = specific_builtin_tool("dalle", "dalle3").unwrap();
        let size = serde_json::to_value(tool.params[0]).unwrap();
        assert_eq!(size["min"], json!(null));
        assert_eq!(size["max"], json!(null));
        assert_eq!(size["help"], json!(""));
        assert_eq!(size["default"], json!("1024x1024"));
        assert_eq!(size["type"], json!("select"));
    }
}
