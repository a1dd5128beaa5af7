use std::hint::black_box;

use codspeed_criterion_compat::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapling_syntax::SyntaxKind::*;
use sapling_syntax::ast::*;
use sapling_syntax::factory::*;
use sapling_syntax::{NodeCache, Slot, SyntaxNode, WalkEvent};

fn name(text: &str) -> Expression {
    create_simple_name_reference(&create_token(IDENTIFIER, text)).into()
}

/// `f(a0, ..., ...xs);` repeated `statements` times.
fn module(statements: usize, arguments: usize) -> ModulePart {
    let statements: Vec<Statement> = (0..statements)
        .map(|_| {
            let mut elements: Vec<FunctionArgument> = (0..arguments)
                .map(|i| {
                    let comma = (i > 0).then(|| create_fixed_token(COMMA));
                    create_positional_argument(comma.as_ref(), &name(&format!("a{i}"))).into()
                })
                .collect();
            elements.push(
                create_rest_argument(
                    &create_fixed_token(COMMA),
                    &create_fixed_token(ELLIPSIS),
                    &name("xs"),
                )
                .into(),
            );
            let call = create_function_call_expression(
                &create_simple_name_reference(&create_token(IDENTIFIER, "f")).into(),
                &create_fixed_token(OPEN_PAREN),
                &create_node_list(&elements),
                &create_fixed_token(CLOSE_PAREN),
            );
            create_expression_statement(&call.into(), &create_fixed_token(SEMICOLON)).into()
        })
        .collect();
    create_module_part(&create_node_list(&statements), &create_token(EOF, ""))
}

fn last_rest_argument(module: &ModulePart) -> RestArgument {
    module
        .syntax()
        .preorder()
        .filter_map(|event| match event {
            WalkEvent::Enter(node) => RestArgument::cast(node),
            WalkEvent::Leave(_) => None,
        })
        .last()
        .unwrap()
}

fn bench_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit");

    for statements in [10, 100, 1000] {
        let module = module(statements, 8);
        let rest = last_rest_argument(&module);
        let replacement = name("ys");

        group.bench_with_input(BenchmarkId::new("replace_leaf", statements), &rest, |b, rest| {
            b.iter(|| black_box(rest.modify().with_expression(&replacement).apply()));
        });
        group.bench_with_input(BenchmarkId::new("no_op", statements), &rest, |b, rest| {
            b.iter(|| black_box(rest.modify().with_expression(&rest.expression()).apply()));
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("factory", |b| b.iter(|| black_box(module(100, 8))));
    group.bench_function("node_cache", |b| {
        b.iter(|| {
            let cache = NodeCache::new();
            let arguments: Vec<_> = (0..800)
                .map(|i| {
                    let name = cache.node(
                        SIMPLE_NAME_REFERENCE,
                        vec![Slot::Token(cache.token(IDENTIFIER, &format!("a{}", i % 8)))],
                    );
                    let comma = if i % 8 == 0 {
                        Slot::Absent
                    } else {
                        Slot::Token(cache.token(COMMA, ","))
                    };
                    cache.node(POSITIONAL_ARGUMENT, vec![comma, Slot::Node(name)])
                })
                .collect();
            black_box(SyntaxNode::new_root(create_list(arguments)))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_edit, bench_build);
criterion_main!(benches);
