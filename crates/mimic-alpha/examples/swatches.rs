use mimic_alpha::cmap::{build_cmap, BuiltinColormaps, CmapOptions, Colormap, ColormapRegistry};
use mimic_alpha::error::BlendError;
use mimic_alpha::{blend_over, Color, Float};

fn swatch(color: &Color) -> String {
    let [r, g, b] = color.to_24bit();
    format!("\x1b[48;2;{};{};{}m  \x1b[0m", r, g, b)
}

fn strip(cmap: &dyn Colormap) -> String {
    (0..64)
        .map(|i| {
            let [r, g, b, _] = cmap.sample(i as Float / 63.0);
            swatch(&Color::srgb(r, g, b))
        })
        .collect()
}

fn main() -> Result<(), BlendError> {
    // 1. Blend a few colors over white and over black
    let names = ["tab:blue", "tab:orange", "tab:green", "tab:red", "tab:purple"];
    for background in ["w", "k"] {
        println!("\nOver {}:", background);
        for alpha in [1.0, 0.75, 0.5, 0.25] {
            let colors = blend_over(names, alpha, background)?;
            let hex: Vec<_> = colors.iter().map(Color::to_hex_format).collect();
            let swatches: String = colors.iter().map(swatch).collect();
            println!("  {:.2}  {}  {}", alpha, swatches, hex.join(" "));
        }
    }

    // 2. Blend whole colormaps
    println!();
    for name in ["jet", "hot", "tab10"] {
        let source = BuiltinColormaps.lookup(name)?;
        let mimic = build_cmap(name, 0.4, &CmapOptions::default())?;
        println!("  {:<12} {}", source.name(), strip(&*source));
        println!("  {:<12} {}", mimic.name(), strip(&mimic));
    }
    println!();

    Ok(())
}
