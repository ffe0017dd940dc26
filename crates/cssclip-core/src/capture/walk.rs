//! Recursive import graph walk.

use futures::future::BoxFuture;

use crate::error::CaptureError;
use crate::fetch::FetchText;
use crate::scan::{scan, RefKind};
use crate::url_model::{
    is_capturable_scheme, is_inline_reference, relative_asset_path, resolve_url, split_fragment,
    CssHome,
};

use super::context::CaptureContext;
use super::rewrite::{self, css_url, import_statement, Replacement, EMPTY_URL};

/// Rewrites `text` (whose own URL is `base_url`), capturing everything it references.
///
/// `home` is where the rewritten text will be stored; rewritten paths are
/// relative to it. Imports are walked strictly in text order so names are
/// deterministic.
pub(super) fn walk<'a, 'p: 'a, F>(
    fetcher: &'a F,
    ctx: &'a mut CaptureContext<'p>,
    text: &'a str,
    base_url: &'a str,
    home: CssHome,
    depth: usize,
) -> BoxFuture<'a, Result<String, CaptureError>>
where
    F: FetchText + ?Sized,
{
    Box::pin(async move {
        let mut replacements = Vec::new();

        for reference in scan(text) {
            if is_inline_reference(&reference.raw) {
                continue;
            }
            let resolved = match resolve_url(&reference.raw, base_url) {
                Ok(url) => url,
                Err(e) if !e.is_fatal() => {
                    tracing::warn!(base = base_url, "{e}; reference left unmodified");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let (url, fragment) = split_fragment(&resolved);
            if !is_capturable_scheme(&url) {
                tracing::debug!(url = %url, "scheme not capturable; reference left unmodified");
                continue;
            }

            let replacement = match reference.kind {
                RefKind::Import => {
                    let name = match ctx.stylesheet_name(&url) {
                        Some(name) => name.to_string(),
                        None => capture_import(fetcher, ctx, &url, depth + 1).await?,
                    };
                    import_statement(&relative_asset_path(home, &ctx.params.storage, &name))
                }
                RefKind::FontUrl | RefKind::ImageUrl => {
                    match ctx.capture_asset(&url, reference.kind) {
                        Some(name) => {
                            let mut path = relative_asset_path(home, &ctx.params.storage, &name);
                            if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
                                path.push('#');
                                path.push_str(&fragment);
                            }
                            css_url(&path)
                        }
                        None => EMPTY_URL.to_string(),
                    }
                }
            };
            replacements.push(Replacement {
                span: reference.span,
                text: replacement,
            });
        }

        Ok(rewrite::apply(text, &replacements))
    })
}

/// Captures the stylesheet at `url` as its own task and returns its name.
///
/// The stylesheet is an asset itself, so its references are rewritten
/// relative to the asset folder. The URL is marked visited before the fetch
/// is issued; a nested reference back to it resolves to the same name.
pub(super) async fn capture_import<F>(
    fetcher: &F,
    ctx: &mut CaptureContext<'_>,
    url: &str,
    depth: usize,
) -> Result<String, CaptureError>
where
    F: FetchText + ?Sized,
{
    let max_depth = ctx.params.config.max_import_depth;
    if depth > max_depth {
        return Err(CaptureError::ImportTooDeep {
            url: url.to_string(),
            depth,
        });
    }

    let (name, slot) = ctx.assign_stylesheet(url);
    tracing::debug!(url, name = %name, depth, "fetching stylesheet");

    let body = fetcher
        .fetch_text(url)
        .await
        .map_err(|source| CaptureError::Fetch {
            url: url.to_string(),
            source,
        })?;
    let rewritten = walk(fetcher, ctx, &body, url, CssHome::AssetFolder, depth).await?;
    ctx.fill_stylesheet(slot, rewritten);
    Ok(name)
}
