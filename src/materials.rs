use crate::{
    datatypes::{
        ElectrodeProperties, InsulatorProperties, MaterialCombo, MaterialProperties,
        ResolvedMaterials,
    },
    error::{CmutError, Result},
};

/// Membrane materials: (name, properties)
const MEMBRANES: &[(&str, MaterialProperties)] = &[
    (
        // hot pressed ceramic, alpha silicon nitride
        "Si3N4",
        MaterialProperties {
            youngs_modulus: (250.0 + 325.04) / 2.0 * 1e9,
            poisson_ratio: 0.24,
            density: 3184.0,
            relative_permittivity: (8.0 + 10.0) / 2.0,
        },
    ),
    (
        "polySi",
        MaterialProperties {
            youngs_modulus: 160e9,
            poisson_ratio: 0.22,
            density: 2330.0,
            relative_permittivity: 11.7,
        },
    ),
];

/// Insulator materials: (name, properties)
const INSULATORS: &[(&str, InsulatorProperties)] = &[(
    "SiO2",
    InsulatorProperties {
        relative_permittivity: 4.2,
    },
)];

/// Top electrode metals: (name, properties)
const ELECTRODES: &[(&str, ElectrodeProperties)] = &[
    (
        "Cr",
        ElectrodeProperties {
            youngs_modulus: (245.0 + 285.0) / 2.0 * 1e9,
            poisson_ratio: 0.21,
            density: 7140.0,
        },
    ),
    (
        "Al",
        ElectrodeProperties {
            youngs_modulus: 69e9,
            poisson_ratio: (0.31 + 0.34) / 2.0,
            density: 2699.0,
        },
    ),
];

fn lookup<T: Copy>(table: &[(&str, T)], class: &'static str, name: &str) -> Result<T> {
    match table.iter().find(|(key, _)| *key == name) {
        Some((_, properties)) => Ok(*properties),
        None => Err(CmutError::UnknownMaterial {
            class,
            name: name.to_owned(),
        }),
    }
}

pub fn lookup_insulator(name: &str) -> Result<InsulatorProperties> {
    lookup(INSULATORS, "insulator", name)
}

pub fn lookup_membrane(name: &str) -> Result<MaterialProperties> {
    lookup(MEMBRANES, "membrane", name)
}

pub fn lookup_electrode(name: &str) -> Result<ElectrodeProperties> {
    lookup(ELECTRODES, "electrode", name)
}

/// Resolves every identifier of a material combination against the catalog
pub fn resolve<'a>(combo: MaterialCombo<'a>) -> Result<ResolvedMaterials<'a>> {
    Ok(ResolvedMaterials {
        combo,
        membrane: lookup_membrane(combo.membrane)?,
        insulator: lookup_insulator(combo.insulator)?,
        electrode: lookup_electrode(combo.metal)?,
    })
}

/// Prints every cataloged material and its constants
pub fn print_catalog() {
    println!("membranes:");
    for (name, m) in MEMBRANES {
        println!(
            "  {name}: E = {:e} Pa, v = {}, rho = {} kg/m^3, eps_r = {}",
            m.youngs_modulus, m.poisson_ratio, m.density, m.relative_permittivity
        );
    }
    println!("insulators:");
    for (name, i) in INSULATORS {
        println!("  {name}: eps_r = {}", i.relative_permittivity);
    }
    println!("electrodes:");
    for (name, e) in ELECTRODES {
        println!(
            "  {name}: E = {:e} Pa, v = {}, rho = {} kg/m^3",
            e.youngs_modulus, e.poisson_ratio, e.density
        );
    }
}
