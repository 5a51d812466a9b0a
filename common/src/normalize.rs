//! テキスト正規化
//!
//! キーワード照合の前処理として、任意のテキストを
//! 小文字・英数字とスペースのみの形に揃える。

/// テキストを照合用に正規化する
///
/// - 小文字化
/// - 英数字・空白以外の文字を1つのスペースに置換（隣接語が連結しないように）
/// - 連続する空白を1つにまとめ、前後の空白を除去
///
/// 空文字列は空文字列のまま返す。
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Option<&str>` 版。`None` は空文字列として扱う
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
