use futures::future::BoxFuture;
use futures::FutureExt;
use resvg::tiny_skia::Pixmap;

use crate::model::compressed_image::CardImage;
use crate::model::errors::SketchResult;
use crate::service::card_image;

/// Turns a stored card image into pixels. Loading is a suspension point: callers must not
/// assume the result is ready on the same tick.
pub trait ImageLoader: Send + Sync {
    fn load(&self, image: CardImage, size: u32) -> BoxFuture<'static, SketchResult<Pixmap>>;
}

/// Decodes in-process. Like an image element's load callback, completion is always delivered on
/// a later scheduler tick, even for data that is already in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct CardImageLoader;

impl ImageLoader for CardImageLoader {
    fn load(&self, image: CardImage, size: u32) -> BoxFuture<'static, SketchResult<Pixmap>> {
        async move {
            tokio::task::yield_now().await;
            card_image::decode(&image, size)
        }
        .boxed()
    }
}
