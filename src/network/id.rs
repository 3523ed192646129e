use std::fmt;

/// Identity of a layer, `l_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub usize);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l_{}", self.0)
    }
}

/// Identity of a neuron: its layer and its position inside it, `n_<layer>_<position>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeuronId {
    pub layer: LayerId,
    pub position: usize,
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n_{}_{}", self.layer, self.position)
    }
}

/// Identity of a synapse, derived from the two neurons it links, `s_<input>_<output>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SynapseId {
    pub input: NeuronId,
    pub output: NeuronId,
}

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s_{}_{}", self.input, self.output)
    }
}

/// Hands out sequential layer ids.
///
/// Owned by whoever builds layers (normally the `Network`), so two networks
/// number their layers independently.
#[derive(Debug, Clone, Default)]
pub struct LayerIdGen {
    next: usize,
}

impl LayerIdGen {
    pub fn new() -> LayerIdGen {
        LayerIdGen::default()
    }

    pub fn next_id(&mut self) -> LayerId {
        let id = LayerId(self.next);
        self.next += 1;
        id
    }
}
