//! Block helpers that fail on missing values.
//!
//! Handlebars strict mode only covers plain expressions. The built-in `if`
//! and `unless` treat a missing value as false, and `each`/`with` fall back to
//! their `{{else}}` branch. These replacements reject a missing parameter
//! first and otherwise behave like the built-ins.

use handlebars::{
    to_json, BlockContext, BlockParams, Context, Handlebars, Helper, HelperDef, HelperResult,
    JsonTruthy, Output, PathAndJson, RenderContext, RenderError, RenderErrorReason, Renderable,
};
use serde_json::Value;

/// Register the strict block helpers over the built-in ones
pub fn register_strict_helpers(registry: &mut Handlebars<'_>) {
    registry.register_helper("if", Box::new(StrictIf { positive: true }));
    registry.register_helper("unless", Box::new(StrictIf { positive: false }));
    registry.register_helper("with", Box::new(StrictWith));
    registry.register_helper("each", Box::new(StrictEach));
}

fn present_param<'a, 'rc>(
    h: &'a Helper<'rc>,
    helper: &'static str,
) -> Result<&'a PathAndJson<'rc>, RenderError> {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(helper, 0))?;
    if param.is_value_missing() {
        return Err(RenderError::strict_error(param.relative_path()));
    }
    Ok(param)
}

fn block_for<'rc>(param: &PathAndJson<'rc>) -> BlockContext<'rc> {
    let mut block = BlockContext::new();
    match param.context_path() {
        Some(path) => block.base_path_mut().clone_from(path),
        None => block.set_base_value(param.value().clone()),
    }
    block
}

#[derive(Clone, Copy)]
struct StrictIf {
    positive: bool,
}

impl HelperDef for StrictIf {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let name = if self.positive { "if" } else { "unless" };
        let param = present_param(h, name)?;
        let include_zero = h
            .hash_get("includeZero")
            .and_then(|v| v.value().as_bool())
            .unwrap_or(false);

        let truthy = param.value().is_truthy(include_zero) == self.positive;
        match if truthy { h.template() } else { h.inverse() } {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Copy)]
struct StrictWith;

impl HelperDef for StrictWith {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = present_param(h, "with")?;

        if !param.value().is_truthy(false) {
            return match h.inverse() {
                Some(t) => t.render(r, ctx, rc, out),
                None => Ok(()),
            };
        }

        let mut block = block_for(param);
        if let Some(parent) = rc.block() {
            block
                .local_variables_mut()
                .clone_from(parent.local_variables());
        }
        if let Some(name) = h.block_param() {
            let mut params = BlockParams::new();
            if param.context_path().is_some() {
                params.add_path(name, Vec::new())?;
            } else {
                params.add_value(name, param.value().clone())?;
            }
            block.set_block_params(params);
        }

        rc.push_block(block);
        let rendered = match h.template() {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        };
        rc.pop_block();
        rendered
    }
}

#[derive(Clone, Copy)]
struct StrictEach;

impl HelperDef for StrictEach {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = present_param(h, "each")?;
        let Some(template) = h.template() else {
            return Ok(());
        };

        let items: Vec<(Value, &Value)> = match param.value() {
            Value::Array(list) => list
                .iter()
                .enumerate()
                .map(|(i, v)| (to_json(i), v))
                .collect(),
            Value::Object(map) => map.iter().map(|(k, v)| (to_json(k), v)).collect(),
            _ => Vec::new(),
        };

        if items.is_empty() {
            return match h.inverse() {
                Some(t) => t.render(r, ctx, rc, out),
                None => Ok(()),
            };
        }

        let is_object = param.value().is_object();
        let base_path = param.context_path();
        rc.push_block(block_for(param));

        let len = items.len();
        for (i, (key, value)) in items.into_iter().enumerate() {
            if let Some(block) = rc.block_mut() {
                block.set_local_var("first", to_json(i == 0));
                block.set_local_var("last", to_json(i + 1 == len));
                block.set_local_var("index", to_json(i));
                if is_object {
                    block.set_local_var("key", key.clone());
                }

                let segment = match &key {
                    Value::String(k) => k.clone(),
                    other => other.to_string(),
                };
                match base_path {
                    Some(base) => {
                        let mut path = base.clone();
                        path.push(segment);
                        *block.base_path_mut() = path;
                    }
                    None => block.set_base_value(value.clone()),
                }

                let mut params = BlockParams::new();
                if let Some(name) = h.block_param() {
                    add_item_param(&mut params, name, base_path.is_some(), value)?;
                    block.set_block_params(params);
                } else if let Some((name, key_name)) = h.block_param_pair() {
                    add_item_param(&mut params, name, base_path.is_some(), value)?;
                    params.add_value(key_name, key)?;
                    block.set_block_params(params);
                }
            }

            if let Err(e) = template.render(r, ctx, rc, out) {
                rc.pop_block();
                return Err(e);
            }
        }

        rc.pop_block();
        Ok(())
    }
}

fn add_item_param<'rc>(
    params: &mut BlockParams<'rc>,
    name: &'rc str,
    by_path: bool,
    value: &Value,
) -> Result<(), RenderError> {
    if by_path {
        params.add_path(name, Vec::new())
    } else {
        params.add_value(name, value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Handlebars<'static> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        register_strict_helpers(&mut registry);
        registry
    }

    fn render(template: &str, data: &Value) -> Result<String, RenderError> {
        registry().render_template(template, data)
    }

    #[test]
    fn test_missing_condition_is_error() {
        let data = json!({"args": {"name": "x"}});
        assert!(render("{{#if args.debug}}debug{{/if}}", &data).is_err());
        assert!(render("{{#unless args.debug}}quiet{{/unless}}", &data).is_err());
        assert!(render("{{#with args.nested}}{{this}}{{else}}none{{/with}}", &data).is_err());
        assert!(render("{{#each args.list}}{{this}}{{else}}none{{/each}}", &data).is_err());
    }

    #[test]
    fn test_present_values_render_like_builtins() {
        let data = json!({"args": {"debug": false, "zero": 0, "user": {"name": "ann"}}});
        assert_eq!(
            render("{{#if args.debug}}on{{else}}off{{/if}}", &data).unwrap(),
            "off"
        );
        assert_eq!(
            render("{{#unless args.debug}}quiet{{/unless}}", &data).unwrap(),
            "quiet"
        );
        assert_eq!(
            render("{{#if args.zero includeZero=true}}zero{{/if}}", &data).unwrap(),
            "zero"
        );
        assert_eq!(
            render("{{#with args.user}}{{name}}{{/with}}", &data).unwrap(),
            "ann"
        );
        assert_eq!(
            render("{{#with args.user as |u|}}{{u.name}}{{/with}}", &data).unwrap(),
            "ann"
        );
    }

    #[test]
    fn test_each_over_arrays_and_objects() {
        let data = json!({
            "packages": [{"uri": "a"}, {"uri": "b"}],
            "args": {"ports": {"http": 80}, "empty": []}
        });
        assert_eq!(
            render("{{#each packages}}{{@index}}:{{uri}}{{#unless @last}},{{/unless}}{{/each}}", &data)
                .unwrap(),
            "0:a,1:b"
        );
        assert_eq!(
            render("{{#each args.ports}}{{@key}}={{this}};{{/each}}", &data).unwrap(),
            "http=80;"
        );
        assert_eq!(
            render("{{#each packages as |p|}}{{p.uri}}{{/each}}", &data).unwrap(),
            "ab"
        );
        assert_eq!(
            render("{{#each args.empty}}x{{else}}none{{/each}}", &data).unwrap(),
            "none"
        );
    }
}
