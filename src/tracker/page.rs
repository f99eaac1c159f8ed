//! 恶搞页面渲染

/// 渲染访问端点返回的恶搞页面
pub fn render_prank_page(image_url: &str, text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Gotcha!</title>
  <style>
    body {{ font-family: sans-serif; text-align: center; background: #111; color: #eee; padding-top: 3em; }}
    img {{ max-width: 90%; border-radius: 8px; }}
    p {{ font-size: 1.3em; }}
  </style>
</head>
<body>
  <img src="{image_url}" alt="gotcha">
  <p>{text}</p>
</body>
</html>
"#
    )
}
