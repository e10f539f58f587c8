use std::sync::Arc;

use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::StoreOp;
use winit::dpi::PhysicalSize;
use winit::window::Window;

const QUAD_VERTEX_COUNT: u32 = 6;
const INITIAL_UI_VERTICES: usize = 4096;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.05,
    b: 0.07,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CellInstance {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub color: [f32; 3],
    pub _pad: f32,
}

const QUAD_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
};

const CELL_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<CellInstance>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x3],
};

const UI_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3],
};

/// A vertex buffer that grows to the next power of two when a frame outgrows it.
struct GrowableBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize, stride: usize) -> Self {
        Self {
            label,
            buffer: create_vertex_buffer(device, label, capacity * stride),
            capacity,
            stride,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let required = bytes.len() / self.stride;
        if required > self.capacity {
            self.capacity = required.next_power_of_two();
            self.buffer = create_vertex_buffer(device, self.label, self.capacity * self.stride);
        }
        queue.write_buffer(&self.buffer, 0, bytes);
    }
}

fn create_vertex_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    label: &str,
    vertex_entry: &str,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vertex_entry),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// GPU side: draws one instanced quad per cell, then the UI strip as plain triangles.
pub struct Renderer {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    grid_pipeline: wgpu::RenderPipeline,
    ui_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    cell_buffer: GrowableBuffer,
    ui_buffer: GrowableBuffer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, cell_count: usize) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::VULKAN,
            flags: wgpu::InstanceFlags::from_env_or_default(),
            backend_options: wgpu::BackendOptions::default(),
        });

        let surface = instance.create_surface(window.clone()).context("create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("request adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::default(),
            })
            .await
            .context("request device")?;

        let capabilities = surface.get_capabilities(&adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .context("surface has no formats")?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let grid_pipeline = create_pipeline(
            &device,
            &shader,
            "grid_pipeline",
            "vs_grid",
            &[QUAD_LAYOUT, CELL_LAYOUT],
            format,
        );
        let ui_pipeline = create_pipeline(&device, &shader, "ui_pipeline", "vs_ui", &[UI_LAYOUT], format);

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_buffer"),
            contents: bytemuck::cast_slice(&[[0.0_f32, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cell_buffer = GrowableBuffer::new(
            &device,
            "cell_buffer",
            cell_count.max(1),
            std::mem::size_of::<CellInstance>(),
        );
        let ui_buffer = GrowableBuffer::new(&device, "ui_buffer", INITIAL_UI_VERTICES, std::mem::size_of::<Vertex>());

        Ok(Self {
            instance,
            surface,
            device,
            queue,
            config,
            size,
            grid_pipeline,
            ui_pipeline,
            quad_buffer,
            cell_buffer,
            ui_buffer,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, cells: &[CellInstance], ui_vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(err) => return Err(err),
        };

        if !cells.is_empty() {
            self.cell_buffer.upload(&self.device, &self.queue, bytemuck::cast_slice(cells));
        }
        if !ui_vertices.is_empty() {
            self.ui_buffer.upload(&self.device, &self.queue, bytemuck::cast_slice(ui_vertices));
        }

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("encoder") });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !cells.is_empty() {
                render_pass.set_pipeline(&self.grid_pipeline);
                render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
                let cell_bytes = std::mem::size_of_val(cells) as u64;
                render_pass.set_vertex_buffer(1, self.cell_buffer.buffer.slice(0..cell_bytes));
                render_pass.draw(0..QUAD_VERTEX_COUNT, 0..cells.len() as u32);
            }

            if !ui_vertices.is_empty() {
                render_pass.set_pipeline(&self.ui_pipeline);
                let vertex_bytes = std::mem::size_of_val(ui_vertices) as u64;
                render_pass.set_vertex_buffer(0, self.ui_buffer.buffer.slice(0..vertex_bytes));
                render_pass.draw(0..ui_vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
