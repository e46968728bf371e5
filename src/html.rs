//! Self-contained HTML rendering of the dashboard.
//!
//! The page embeds its CSS and a small script for column sorting, so the
//! output works both as a served page and as a file opened from disk.

use std::fmt::Write;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::{DashboardView, HighlightCard, TableRow};

pub fn render_page(view: &DashboardView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <main class="container">
        {header}
        <hr>
        {kpis}
        <hr>
        {controls}
        {table}
        <hr>
        {highlights}
        <hr>
        <footer class="caption">{footer}</footer>
    </main>
    <script>{js}</script>
</body>
</html>"#,
        title = esc(&view.page_title),
        css = inline_css(),
        header = render_header(view),
        kpis = render_kpis(view),
        controls = render_controls(view),
        table = render_table(&view.rows, view.score_scale),
        highlights = render_highlights(&view.highlights),
        footer = esc(&view.footer),
        js = inline_javascript(),
    )
}

/// Page shown instead of the dashboard when the table cannot be used.
pub fn render_error_page(error: &DashboardError, config: &DashboardConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <main class="container">
        <h1>{title}</h1>
        <div class="banner error" role="alert">
            <strong>Não foi possível gerar o painel.</strong>
            <p>{message}</p>
        </div>
    </main>
</body>
</html>"#,
        title = esc(&config.page_title),
        css = inline_css(),
        message = esc(&error.to_string()),
    )
}

fn render_header(view: &DashboardView) -> String {
    format!(
        r#"<header>
            <h1>🎬 {title}</h1>
            <p class="caption">Canal: <strong>{channel}</strong> | Análise automática de potencial para Shorts</p>
            <p><strong>Última atualização:</strong> {generated_at}<br>
            <strong>Vídeos analisados:</strong> {count}</p>
        </header>"#,
        title = esc(&view.page_title),
        channel = esc(&view.channel_name),
        generated_at = esc(&view.generated_at),
        count = view.video_count,
    )
}

fn render_kpis(view: &DashboardView) -> String {
    let tiles = [
        ("Views médias", &view.mean_views),
        ("Engajamento / 1000 views", &view.mean_engagement),
        ("Melhor Short Score", &view.max_short_score),
        ("Melhor Vídeo", &view.top_video_title),
    ];

    let mut output = String::from(r#"<section class="kpis">"#);
    for (label, value) in tiles {
        let _ = write!(
            output,
            r#"<div class="kpi"><h3>{}</h3><div class="value">{}</div></div>"#,
            esc(label),
            esc(value)
        );
    }
    output.push_str("</section>");
    output
}

fn render_controls(view: &DashboardView) -> String {
    format!(
        r#"<section>
            <h2>Priorização para Shorts</h2>
            <form method="get" class="controls">
                <label for="top">Quantos vídeos priorizar?</label>
                <input type="number" id="top" name="top" min="1" max="{max}" value="{value}">
                <button type="submit">Atualizar</button>
            </form>
            <div class="banner info">Esses são os vídeos que <strong>devem virar Shorts primeiro</strong>, com base em engajamento relativo e tração pública.</div>
        </section>"#,
        max = view.video_count.max(1),
        value = view.top_n,
    )
}

fn render_table(rows: &[TableRow], score_scale: f64) -> String {
    let scale = if score_scale > 0.0 { score_scale } else { 1.0 };
    let mut output = String::from(
        r#"<section>
            <h2>Ranking de vídeos por potencial de Shorts</h2>
            <table class="sortable">
                <thead><tr>
                    <th data-type="text">Título</th>
                    <th data-type="number">Views</th>
                    <th data-type="number">Engajamento / 1000 views</th>
                    <th data-type="number">Short Score</th>
                    <th>Abrir vídeo</th>
                </tr></thead>
                <tbody>"#,
    );

    for row in rows {
        let progress = row.short_score.clamp(0.0, scale);
        let _ = write!(
            output,
            r#"<tr>
                <td>{title}</td>
                <td data-value="{views}">{views}</td>
                <td data-value="{engagement}">{engagement_label}</td>
                <td data-value="{score}"><progress value="{progress}" max="{scale}"></progress> {score_label}</td>
                <td><a href="{url}" target="_blank" rel="noopener">Abrir vídeo</a></td>
            </tr>"#,
            title = esc(&row.title),
            views = row.views,
            engagement = row.engagement,
            engagement_label = esc(&row.engagement_label),
            score = row.short_score,
            score_label = esc(&row.short_score_label),
            url = esc(&row.url),
        );
    }

    output.push_str("</tbody></table></section>");
    output
}

fn render_highlights(cards: &[HighlightCard]) -> String {
    let mut output = format!(
        r#"<section>
            <h2>Top {} vídeos para cortar agora</h2>
            <div class="highlights">"#,
        cards.len()
    );

    for card in cards {
        let _ = write!(
            output,
            r#"<article class="card">
                <h3>#{rank}</h3>
                <p><strong>{title}</strong></p>
                <ul>
                    <li>Views: {views}</li>
                    <li>Engajamento/1000: {engagement}</li>
                    <li>Short Score: <strong>{score}</strong></li>
                </ul>
                <a class="button" href="{url}" target="_blank" rel="noopener">Abrir no YouTube</a>
            </article>"#,
            rank = card.rank,
            title = esc(&card.title),
            views = esc(&card.views),
            engagement = esc(&card.engagement),
            score = esc(&card.short_score),
            url = esc(&card.url),
        );
    }

    output.push_str("</div></section>");
    output
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; line-height: 1.6; color: #1f2937; background: #ffffff; }
.container { max-width: 1400px; margin: 0 auto; padding: 2rem; }
h1 { font-size: 2.25rem; margin-bottom: 0.5rem; }
h2 { font-size: 1.5rem; margin: 1rem 0; }
hr { border: none; border-top: 1px solid #e5e7eb; margin: 1.5rem 0; }
.caption { color: #6b7280; font-size: 0.875rem; }
.kpis { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.kpi h3 { font-size: 0.875rem; font-weight: 500; color: #6b7280; }
.kpi .value { font-size: 1.75rem; font-weight: 600; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.controls { display: flex; gap: 0.75rem; align-items: center; margin-bottom: 1rem; }
.controls input { width: 6rem; padding: 0.25rem 0.5rem; }
.banner { padding: 1rem; border-radius: 0.5rem; margin-bottom: 1rem; }
.banner.info { background: #e0f2fe; color: #075985; }
.banner.error { background: #fee2e2; color: #991b1b; }
table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
th[data-type] { cursor: pointer; user-select: none; }
th.asc::after { content: " ▲"; }
th.desc::after { content: " ▼"; }
progress { width: 8rem; vertical-align: middle; }
.highlights { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1rem; }
.card { background: #f9fafb; border-radius: 0.5rem; padding: 1rem; }
.card ul { margin: 0.5rem 0 1rem 1.25rem; }
.button { display: inline-block; padding: 0.4rem 0.9rem; border: 1px solid #d1d5db; border-radius: 0.5rem; color: #1f2937; text-decoration: none; }
.button:hover { border-color: #ef4444; color: #ef4444; }
@media (max-width: 900px) { .kpis, .highlights { grid-template-columns: 1fr; } }
"#
}

fn inline_javascript() -> &'static str {
    r#"
document.querySelectorAll('table.sortable').forEach(function (table) {
    var headers = table.querySelectorAll('th[data-type]');
    headers.forEach(function (th) {
        th.addEventListener('click', function () {
            var index = Array.prototype.indexOf.call(th.parentNode.children, th);
            var numeric = th.dataset.type === 'number';
            var asc = !th.classList.contains('asc');
            headers.forEach(function (other) { other.classList.remove('asc', 'desc'); });
            th.classList.add(asc ? 'asc' : 'desc');
            var body = table.tBodies[0];
            var rows = Array.prototype.slice.call(body.rows);
            rows.sort(function (a, b) {
                var x = a.cells[index].dataset.value || a.cells[index].textContent;
                var y = b.cells[index].dataset.value || b.cells[index].textContent;
                var cmp = numeric ? parseFloat(x) - parseFloat(y) : x.localeCompare(y);
                return asc ? cmp : -cmp;
            });
            rows.forEach(function (row) { body.appendChild(row); });
        });
    });
});
"#
}
