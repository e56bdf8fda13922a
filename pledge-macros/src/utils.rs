use proc_macro::{Delimiter, Group, TokenStream, TokenTree};

/// Parses the `max_turns = N` option of `#[pledge::main]` / `#[pledge::test]`.
///
/// Returns the message of the compile error to emit for unknown options,
/// values that are not an integer, or a zero budget.
pub(crate) fn parse_max_turns(attr: &str) -> Result<Option<usize>, String> {
    let mut max_turns = None;

    for part in attr.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            return Err(format!("expected `max_turns = N`, found `{}`", part));
        };

        let (key, value) = (key.trim(), value.trim());
        if key != "max_turns" {
            return Err(format!("unknown option `{}`", key));
        }

        let n = value
            .replace('_', "")
            .parse::<usize>()
            .map_err(|_| format!("`max_turns` expects an integer, found `{}`", value))?;

        if n == 0 {
            return Err("`max_turns` must be greater than zero".to_string());
        }

        max_turns = Some(n);
    }

    Ok(max_turns)
}

/// Builds the `RuntimeBuilder` expression for the given options.
pub(crate) fn runtime_builder(max_turns: Option<usize>) -> String {
    let mut builder = String::from("::pledge::RuntimeBuilder::new()");

    if let Some(n) = max_turns {
        builder.push_str(&format!(".max_turns({})", n));
    }

    builder.push_str(".build()");
    builder
}

/// Replaces the body of the function in `tokens` with `wrap(body)`.
///
/// The body is the last brace-delimited group of the item. Returns `None`
/// if the item has no body.
pub(crate) fn rewrite_body(
    tokens: &mut [TokenTree],
    wrap: impl FnOnce(String) -> String,
) -> Option<()> {
    let pos = tokens
        .iter()
        .rposition(|t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace))?;

    let block = match &tokens[pos] {
        TokenTree::Group(g) => g.stream().to_string(),
        _ => unreachable!(),
    };

    let stream = wrap(block).parse::<TokenStream>().ok()?;
    tokens[pos] = TokenTree::Group(Group::new(Delimiter::Brace, stream));

    Some(())
}

/// Builds a `compile_error!` invocation carrying `msg`.
pub(crate) fn compile_error(msg: &str) -> TokenStream {
    format!("compile_error!({:?});", msg)
        .parse()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_no_options() {
        assert_eq!(parse_max_turns(""), Ok(None));
    }

    #[test]
    fn parses_max_turns() {
        assert_eq!(parse_max_turns("max_turns = 10"), Ok(Some(10)));
        assert_eq!(parse_max_turns("max_turns = 10_000"), Ok(Some(10_000)));
    }

    #[test]
    fn rejects_a_zero_budget() {
        assert_eq!(
            parse_max_turns("max_turns = 0"),
            Err("`max_turns` must be greater than zero".to_string())
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_max_turns("max_turns = ten").is_err());
        assert!(parse_max_turns("max_turns = -1").is_err());
        assert!(parse_max_turns("max_turns").is_err());
    }

    #[test]
    fn rejects_unknown_options() {
        assert_eq!(
            parse_max_turns("flavor = 1"),
            Err("unknown option `flavor`".to_string())
        );
    }
}
