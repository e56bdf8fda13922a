mod utils;

use proc_macro::{TokenStream, TokenTree};

/// Runs `main` inside a freshly built pledge runtime.
///
/// The body executes with the runtime entered, then the microtask queue is
/// drained until idle. Accepts `max_turns = N` to bound the drain; a zero or
/// non-integer budget is a compile error.
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();
    let builder = match utils::parse_max_turns(&attr.to_string()) {
        Ok(max_turns) => utils::runtime_builder(max_turns),
        Err(msg) => return utils::compile_error(&msg),
    };

    let rewritten = utils::rewrite_body(&mut tokens, |block| {
        format!(
            "{{
            let runtime = {};
            runtime
                .run(|| {{
                    {}
                }})
                .expect(\"pledge runtime failed to drain the microtask queue\")
        }}",
            builder, block
        )
    });

    if rewritten.is_none() {
        return utils::compile_error("#[pledge::main] expects a function with a body");
    }

    tokens.into_iter().collect()
}

/// Turns a function into a `#[test]` running inside a pledge runtime.
///
/// Reactions still queued when the body returns are run before the test
/// finishes; call `pledge::run_until_idle()` inside the body to observe
/// outcomes mid-test.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut tokens = item.into_iter().collect::<Vec<_>>();
    let builder = match utils::parse_max_turns(&attr.to_string()) {
        Ok(max_turns) => utils::runtime_builder(max_turns),
        Err(msg) => return utils::compile_error(&msg),
    };

    let rewritten = utils::rewrite_body(&mut tokens, |block| {
        format!(
            "{{
        let runtime = {};
        runtime
            .run(|| {{ {} }})
            .expect(\"pledge runtime failed to drain the microtask queue\");
    }}",
            builder, block
        )
    });

    if rewritten.is_none() {
        return utils::compile_error("#[pledge::test] expects a function with a body");
    }

    let test_attr: TokenStream = "#[test]".parse().unwrap();
    let mut result: Vec<TokenTree> = test_attr.into_iter().collect();
    result.extend(tokens);

    result.into_iter().collect()
}
