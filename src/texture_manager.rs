use std::collections::HashMap;
use std::sync::Arc;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::error::ImportResult;
use crate::id_generator::ElementId;

struct CachedTexture {
    /// The bytes the texture was built from; a different `Arc` means stale
    source: Arc<[u8]>,
    handle: TextureHandle,
    last_used: u64,
}

/// Caches one texture per image element, rebuilt when the element's pixel
/// data changes
pub struct TextureManager {
    textures: HashMap<ElementId, CachedTexture>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates the texture for `element_id` built from `source`
    pub fn get_or_create_texture<F>(
        &mut self,
        element_id: ElementId,
        source: &Arc<[u8]>,
        generator: F,
        ctx: &Context,
    ) -> ImportResult<TextureId>
    where
        F: FnOnce(&[u8]) -> ImportResult<ColorImage>,
    {
        if let Some(cached) = self.textures.get_mut(&element_id) {
            if Arc::ptr_eq(&cached.source, source) {
                cached.last_used = self.current_frame;
                return Ok(cached.handle.id());
            }
            log::debug!("Pixel data of {} changed, rebuilding texture", element_id);
        }

        let image = generator(&source[..])?;
        let handle = ctx.load_texture(format!("image_{}", element_id), image, TextureOptions::LINEAR);
        let id = handle.id();
        self.textures.insert(
            element_id,
            CachedTexture {
                source: Arc::clone(source),
                handle,
                last_used: self.current_frame,
            },
        );
        self.prune_cache_if_needed();
        Ok(id)
    }

    /// Drop textures for elements that are no longer in the document
    pub fn retain_elements(&mut self, live: impl Fn(ElementId) -> bool) {
        self.textures.retain(|id, _| live(*id));
    }

    fn prune_cache_if_needed(&mut self) {
        if self.textures.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(ElementId, u64)> = self
            .textures
            .iter()
            .map(|(id, cached)| (*id, cached.last_used))
            .collect();
        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (id, _) in entries.into_iter().take(to_remove) {
            self.textures.remove(&id);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }

    pub fn contains(&self, element_id: ElementId) -> bool {
        self.textures.contains_key(&element_id)
    }
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.textures.len())
            .field("current_frame", &self.current_frame)
            .field("max_cache_size", &self.max_cache_size)
            .finish()
    }
}
