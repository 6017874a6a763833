//! Script outline templating for `/api/generate_script`

use crate::models::ScriptSource;

/// Compact view count: 942, 15.3K, 1.2M
pub fn format_views(views: i64) -> String {
    let views = views.max(0);
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Plain-text outline modelled on a benchmark video
pub fn render_script(source: &ScriptSource) -> String {
    let views = format_views(source.view_count);
    format!(
        "SCRIPT OUTLINE\n\
         Benchmark: \"{title}\" ({views} views)\n\
         Source: https://www.youtube.com/watch?v={id}\n\
         \n\
         HOOK (0:00-0:15)\n\
         \"{title}\" pulled {views} views. Here's what it left out for Texas families.\n\
         \n\
         BEAT 1 (0:15-1:30)\n\
         Restate the viewer's problem in plain language. One real Texas example.\n\
         \n\
         BEAT 2 (1:30-4:00)\n\
         Walk through the policy options the benchmark glossed over. Compare costs on screen.\n\
         \n\
         BEAT 3 (4:00-6:00)\n\
         Answer the top objection from the benchmark's comments.\n\
         \n\
         CALL TO ACTION\n\
         Invite viewers to book a free quote review and subscribe for weekly Texas coverage tips.\n",
        title = source.title,
        views = views,
        id = source.video_id,
    )
}
