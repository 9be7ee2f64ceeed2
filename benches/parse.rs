// benches/parse.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use fixture_stats::{
    source::extract_results_text,
    specs::results_table::{parse_tokens, tokenize},
    Sport,
};

/// A descending 30-round basketball season, 9 matches per round, quarters included.
fn synthetic_tokens() -> Vec<String> {
    let mut out = Vec::new();
    for round in (1..=30u32).rev() {
        out.push(format!("ROUND {round}"));
        for m in 0..9u32 {
            let day = 1 + (round % 28);
            let month = 1 + (round % 12);
            out.push(format!("{day:02}.{month:02}. {:02}:30", 17 + m % 4));
            if m == 4 {
                out.push(String::from("AOT"));
            }
            out.push(format!("Team {}", m * 2));
            out.push(format!("Team {}", m * 2 + 1));
            out.push(s(80 + m));
            out.push(s(75 + round % 10));
            for q in 0..4 {
                out.push(s(18 + (m + q) % 7));
                out.push(s(17 + (round + q) % 6));
            }
        }
    }
    out
}

fn s(n: u32) -> String { n.to_string() }

fn synthetic_page(tokens: &[String]) -> String {
    let mut page = String::from("<html><body><div id=\"live-table\">");
    for t in tokens {
        page.push_str("<div class=\"cell\">");
        page.push_str(t);
        page.push_str("</div>");
    }
    page.push_str("</div></body></html>");
    page
}

fn bench_parse(c: &mut Criterion) {
    let tokens = synthetic_tokens();
    let text = tokens.join("\n");
    let page = synthetic_page(&tokens);

    c.bench_function("parse_tokens_season", |b| {
        b.iter(|| {
            let ms = parse_tokens(black_box(&tokens), Sport::Basketball);
            black_box(ms.len())
        })
    });

    c.bench_function("tokenize_and_parse", |b| {
        b.iter(|| {
            let ms = parse_tokens(&tokenize(black_box(&text)), Sport::Basketball);
            black_box(ms.len())
        })
    });

    c.bench_function("extract_results_text", |b| {
        b.iter(|| {
            let t = extract_results_text(black_box(&page));
            black_box(t.map(|t| t.len()))
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
