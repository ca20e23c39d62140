use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::engine::error::ResourceError;

/// Sampling parameters for a texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureOptions {
    pub wrap: wgpu::AddressMode,
    pub filter: wgpu::FilterMode,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            wrap: wgpu::AddressMode::Repeat,
            filter: wgpu::FilterMode::Linear,
        }
    }
}

pub struct Texture {
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

/// Decodes an encoded image into RGBA8. Without `alpha` the alpha channel
/// is discarded and every pixel comes out opaque.
pub fn decode_rgba(bytes: &[u8], alpha: bool) -> Result<RgbaImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let mut rgba = img.to_rgba8();
    if !alpha {
        for pixel in rgba.pixels_mut() {
            pixel[3] = 255;
        }
    }
    Ok(rgba)
}

/// Reads and decodes an image file, attaching the path to any error.
pub fn read_rgba(path: &Path, alpha: bool) -> Result<RgbaImage, ResourceError> {
    let bytes = std::fs::read(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_rgba(&bytes, alpha).map_err(|source| ResourceError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Rejects empty images and images larger than the device's 2D texture limit.
pub fn check_dimensions(name: &str, width: u32, height: u32, max: u32) -> Result<(), ResourceError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(ResourceError::TextureSize {
            name: name.to_string(),
            width,
            height,
            max,
        });
    }
    Ok(())
}

impl Texture {
    /// Layout shared by every texture: a 2D view at binding 0, its sampler at binding 1.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                // Texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        rgba: &RgbaImage,
        options: TextureOptions,
    ) -> Result<Self, ResourceError> {
        let (width, height) = rgba.dimensions();
        check_dimensions(label, width, height, device.limits().max_texture_dimension_2d)?;
        Ok(Self::from_rgba_bytes(device, queue, layout, label, rgba, width, height, options))
    }

    pub fn from_file(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &Path,
        alpha: bool,
        options: TextureOptions,
    ) -> Result<Self, ResourceError> {
        let rgba = read_rgba(path, alpha)?;
        let label = path.to_string_lossy();
        let texture = Self::from_image(device, queue, layout, &label, &rgba, options)?;
        info!(
            "[texture] Loaded texture: {}x{} from {}",
            texture.width,
            texture.height,
            path.display()
        );
        Ok(texture)
    }

    /// A 2x2 checkerboard, used in place of assets that fail to load.
    pub fn checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let data: [u8; 16] = [
            255, 0, 255, 255,   0, 0, 0, 255,  // Magenta, Black
            0, 0, 0, 255,   255, 0, 255, 255,  // Black, Magenta
        ];
        let options = TextureOptions {
            wrap: wgpu::AddressMode::Repeat,
            filter: wgpu::FilterMode::Nearest,
        };
        Self::from_rgba_bytes(device, queue, layout, "Checkerboard Texture", &data, 2, 2, options)
    }

    #[allow(clippy::too_many_arguments)]
    fn from_rgba_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        data: &[u8],
        width: u32,
        height: u32,
        options: TextureOptions,
    ) -> Self {
        let texture_size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            label: Some(label),
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            texture_size,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let texture_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: options.wrap,
            address_mode_v: options.wrap,
            address_mode_w: options.wrap,
            mag_filter: options.filter,
            min_filter: options.filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture_sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            width,
            height,
        }
    }

    /// Makes this texture the one sampled through bind group `slot`.
    pub fn bind<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, slot: u32) {
        pass.set_bind_group(slot, &self.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encoding");
        bytes
    }

    fn translucent_image() -> RgbaImage {
        RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 40, y as u8 * 90, 200, 64]))
    }

    #[test]
    fn test_decode_keeps_alpha_when_requested() {
        let bytes = encode_png(&translucent_image());
        let decoded = decode_rgba(&bytes, true).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([80, 90, 200, 64]));
    }

    #[test]
    fn test_decode_forces_opaque_without_alpha() {
        let bytes = encode_png(&translucent_image());
        let decoded = decode_rgba(&bytes, false).unwrap();
        assert!(decoded.pixels().all(|p| p[3] == 255));
        assert_eq!(decoded.get_pixel(1, 0)[0], 40, "Colour channels are untouched");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_rgba(b"definitely not an image", true).is_err());
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let path = Path::new("does/not/exist.png");
        match read_rgba(path, true) {
            Err(ResourceError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected an I/O error, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn test_dimensions_within_limit_pass() {
        assert!(check_dimensions("paddle", 512, 128, 8192).is_ok());
        assert!(check_dimensions("edge", 8192, 8192, 8192).is_ok());
    }

    #[test]
    fn test_oversized_image_is_rejected() {
        match check_dimensions("huge.png", 9000, 1, 8192) {
            Err(ResourceError::TextureSize { name, width, height, max }) => {
                assert_eq!(name, "huge.png");
                assert_eq!((width, height, max), (9000, 1, 8192));
            }
            other => panic!("Expected a size error, got {:?}", other),
        }
        assert!(check_dimensions("tall.png", 1, 8193, 8192).is_err());
    }

    #[test]
    fn test_empty_image_is_rejected() {
        assert!(check_dimensions("empty.png", 0, 4, 8192).is_err());
        assert!(check_dimensions("empty.png", 4, 0, 8192).is_err());
    }

    #[test]
    fn test_default_options_repeat_linear() {
        let options = TextureOptions::default();
        assert_eq!(options.wrap, wgpu::AddressMode::Repeat);
        assert_eq!(options.filter, wgpu::FilterMode::Linear);
    }
}
