//! wgpu forward renderer for the mascot scene.
//!
//! One pipeline pair (opaque, alpha-blended), a per-frame camera/lights
//! bind group, and a dynamic-offset uniform slot per mesh node.

use std::sync::Arc;

use glam::{Mat3, Mat4};
use log::info;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::model::Model;
use crate::scene::camera::PerspectiveCamera;
use crate::scene::Scene;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const MAX_DIRECTIONAL_LIGHTS: usize = 4;
const NODE_UNIFORM_STRIDE: u64 = 256;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniform {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct LightsUniform {
    directions: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct NodeUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

/// GPU-resident mesh data for one model node
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transparent: bool,
}

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: Option<wgpu::Surface<'static>>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    opaque_pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,
    frame_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    node_bind_group_layout: wgpu::BindGroupLayout,
    node_bind_group: Option<wgpu::BindGroup>,
    node_buffer: Option<wgpu::Buffer>,
    meshes: Vec<GpuMesh>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, width, height);
        surface.configure(&device, &surface_config);

        let depth_view = Self::create_depth_view(&device, width, height);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[FrameUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                camera_position: [0.0; 4],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform {
                directions: [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS],
                params: [0.0; 4],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
                label: Some("frame_bind_group_layout"),
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let node_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("node_bind_group_layout"),
            });

        let (opaque_pipeline, blend_pipeline) = Self::create_pipelines(
            &device,
            surface_config.format,
            &frame_bind_group_layout,
            &node_bind_group_layout,
        );

        Ok(Self {
            device,
            queue,
            surface: Some(surface),
            surface_config,
            depth_view,
            opaque_pipeline,
            blend_pipeline,
            frame_bind_group,
            camera_buffer,
            lights_buffer,
            node_bind_group_layout,
            node_bind_group: None,
            node_buffer: None,
            meshes: Vec::new(),
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| "Failed to find appropriate adapter".into())
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| e.into())
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_pipelines(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
        node_layout: &wgpu::BindGroupLayout,
    ) -> (wgpu::RenderPipeline, wgpu::RenderPipeline) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mascot Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mascot Pipeline Layout"),
            bind_group_layouts: &[frame_layout, node_layout],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let opaque = make_pipeline("Opaque Pipeline", wgpu::BlendState::REPLACE, true);
        let blended = make_pipeline("Blend Pipeline", wgpu::BlendState::ALPHA_BLENDING, false);
        (opaque, blended)
    }

    /// Upload the model's geometry; replaces any previously uploaded set
    pub fn upload_model(&mut self, model: &Model) {
        self.meshes = model
            .nodes
            .iter()
            .map(|node| {
                let vertices: Vec<Vertex> = node
                    .geometry
                    .positions
                    .iter()
                    .zip(&node.geometry.normals)
                    .map(|(p, n)| Vertex {
                        position: p.to_array(),
                        normal: n.to_array(),
                    })
                    .collect();

                let vertex_buffer =
                    self.device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("{} Vertices", node.name)),
                            contents: bytemuck::cast_slice(&vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        });
                let index_buffer =
                    self.device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("{} Indices", node.name)),
                            contents: bytemuck::cast_slice(&node.geometry.indices),
                            usage: wgpu::BufferUsages::INDEX,
                        });

                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: node.geometry.indices.len() as u32,
                    transparent: node.material.is_transparent(),
                }
            })
            .collect();

        let node_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Node Uniform Buffer"),
            size: NODE_UNIFORM_STRIDE * self.meshes.len().max(1) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.node_bind_group = Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.node_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &node_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<NodeUniform>() as u64),
                }),
            }],
            label: Some("node_bind_group"),
        }));
        self.node_buffer = Some(node_buffer);

        info!("Uploaded {} mesh nodes to the GPU", self.meshes.len());
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        if let Some(surface) = &self.surface {
            surface.configure(&self.device, &self.surface_config);
        }
        self.depth_view = Self::create_depth_view(&self.device, width, height);
    }

    /// Rasterize the scene through the camera to the surface
    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        let surface = self
            .surface
            .as_ref()
            .ok_or("Renderer surface has been released")?;

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[FrameUniform {
                view_proj: camera.view_projection().to_cols_array_2d(),
                camera_position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
            }]),
        );
        self.queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::cast_slice(&[Self::lights_uniform(scene)]),
        );

        if let (Some(model), Some(node_buffer)) = (scene.model(), &self.node_buffer) {
            let model = model.borrow();
            let mut staging = vec![0u8; NODE_UNIFORM_STRIDE as usize * model.nodes.len()];
            let root = model.transform.matrix();
            for (i, node) in model.nodes.iter().enumerate() {
                let world = root * node.transform.matrix();
                let normal =
                    Mat4::from_mat3(Mat3::from_mat4(world).inverse().transpose());
                let uniform = NodeUniform {
                    model: world.to_cols_array_2d(),
                    normal: normal.to_cols_array_2d(),
                    color: [
                        node.material.base_color.x,
                        node.material.base_color.y,
                        node.material.base_color.z,
                        node.material.opacity,
                    ],
                    params: [
                        node.material.roughness,
                        node.material.metalness,
                        if node.material.double_sided { 1.0 } else { 0.0 },
                        0.0,
                    ],
                };
                let offset = NODE_UNIFORM_STRIDE as usize * i;
                staging[offset..offset + std::mem::size_of::<NodeUniform>()]
                    .copy_from_slice(bytemuck::bytes_of(&uniform));
            }
            if !staging.is_empty() {
                self.queue.write_buffer(node_buffer, 0, &staging);
            }
        }

        let output = surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let background = scene.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.x as f64,
                            g: background.y as f64,
                            b: background.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(node_bind_group) = &self.node_bind_group {
                pass.set_bind_group(0, &self.frame_bind_group, &[]);

                // Opaque nodes first, blended nodes over them
                for transparent_pass in [false, true] {
                    let pipeline = if transparent_pass {
                        &self.blend_pipeline
                    } else {
                        &self.opaque_pipeline
                    };
                    pass.set_pipeline(pipeline);
                    for (i, mesh) in self.meshes.iter().enumerate() {
                        if mesh.transparent != transparent_pass {
                            continue;
                        }
                        let offset = (NODE_UNIFORM_STRIDE * i as u64) as u32;
                        pass.set_bind_group(1, node_bind_group, &[offset]);
                        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        pass.set_index_buffer(
                            mesh.index_buffer.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn lights_uniform(scene: &Scene) -> LightsUniform {
        let mut directions = [[0.0f32; 4]; MAX_DIRECTIONAL_LIGHTS];
        let count = scene.lights.directional.len().min(MAX_DIRECTIONAL_LIGHTS);
        for (slot, light) in directions.iter_mut().zip(&scene.lights.directional) {
            let dir = light.direction();
            *slot = [dir.x, dir.y, dir.z, light.intensity];
        }
        LightsUniform {
            directions,
            params: [scene.lights.ambient_intensity, count as f32, 0.0, 0.0],
        }
    }

    /// Release the output surface. Single-shot: rendering afterwards fails.
    pub fn release_surface(&mut self) {
        self.surface.take();
        self.meshes.clear();
        self.node_bind_group = None;
        self.node_buffer = None;
    }
}
