use super::{Val, ValType};
use crate::error;
use crate::lang::{Error, Ident};
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Variable memory. Scalars and arrays are separate namespaces keyed
/// by the suffixed name; an array's rank and shape are frozen once it
/// is dimensioned.
#[derive(Debug, Default)]
pub struct Store {
    vars: HashMap<Rc<str>, Val>,
    arrays: HashMap<Rc<str>, Array>,
}

#[derive(Debug)]
struct Array {
    shape: Vec<usize>,
    data: Vec<Val>,
}

impl Array {
    /// A shape too large to address is an out-of-bounds error, not a
    /// panic.
    fn new(shape: Vec<usize>, fill: Val) -> Result<Array> {
        let mut len: usize = 1;
        for dim in &shape {
            len = len
                .checked_mul(*dim)
                .ok_or_else(|| error!(IndexOutOfBounds))?;
        }
        Ok(Array {
            shape,
            data: vec![fill; len],
        })
    }

    /// Row-major offset; checks rank and bounds.
    fn offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.shape.len() {
            return Err(error!(IllegalIndex));
        }
        let mut offset: usize = 0;
        for (index, len) in indices.iter().zip(&self.shape) {
            if index >= len {
                return Err(error!(IndexOutOfBounds));
            }
            offset = offset
                .checked_mul(*len)
                .and_then(|n| n.checked_add(*index))
                .ok_or_else(|| error!(IndexOutOfBounds))?;
        }
        Ok(offset)
    }
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.arrays.clear();
    }

    /// Reading an unset scalar yields the type-appropriate zero.
    pub fn fetch(&self, ident: &Ident) -> Val {
        match self.vars.get(ident.name()) {
            Some(val) => val.clone(),
            None => ValType::for_ident(ident).default_val(),
        }
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        let value = ValType::for_ident(ident).coerce(value)?;
        self.vars.insert(ident.name().into(), value);
        Ok(())
    }

    /// Replaces a scalar for the duration of a user function call,
    /// returning whatever it displaced so it can be restored.
    pub fn shadow(&mut self, ident: &Ident, value: Val) -> Result<Option<Val>> {
        let value = ValType::for_ident(ident).coerce(value)?;
        Ok(self.vars.insert(ident.name().into(), value))
    }

    pub fn unshadow(&mut self, ident: &Ident, previous: Option<Val>) {
        match previous {
            Some(val) => self.vars.insert(ident.name().into(), val),
            None => self.vars.remove(ident.name()),
        };
    }

    /// Explicit DIM. Each subscript is the highest legal index, so
    /// DIM A(10) holds indices 0 through 10.
    pub fn dimension(&mut self, ident: &Ident, subscripts: &[usize]) -> Result<()> {
        if self.arrays.contains_key(ident.name()) {
            return Err(error!(RedimensionedArray));
        }
        let mut shape: Vec<usize> = Vec::new();
        for subscript in subscripts {
            let dim = subscript
                .checked_add(1)
                .ok_or_else(|| error!(IndexOutOfBounds))?;
            shape.push(dim);
        }
        let fill = ValType::for_ident(ident).default_val();
        self.arrays
            .insert(ident.name().into(), Array::new(shape, fill)?);
        Ok(())
    }

    pub fn fetch_element(&mut self, ident: &Ident, indices: &[usize]) -> Result<Val> {
        let array = self.auto_dimension(ident, indices)?;
        let offset = array.offset(indices)?;
        Ok(array.data[offset].clone())
    }

    pub fn store_element(&mut self, ident: &Ident, indices: &[usize], value: Val) -> Result<()> {
        let value = ValType::for_ident(ident).coerce(value)?;
        let array = self.auto_dimension(ident, indices)?;
        let offset = array.offset(indices)?;
        array.data[offset] = value;
        Ok(())
    }

    /// First indexed use of an unknown name creates a rank-1 array of
    /// length 11. More than one subscript requires an explicit DIM.
    fn auto_dimension(&mut self, ident: &Ident, indices: &[usize]) -> Result<&mut Array> {
        if !self.arrays.contains_key(ident.name()) {
            if indices.len() != 1 {
                return Err(error!(UndimensionedArray));
            }
            let fill = ValType::for_ident(ident).default_val();
            self.arrays
                .insert(ident.name().into(), Array::new(vec![11], fill)?);
        }
        match self.arrays.get_mut(ident.name()) {
            Some(array) => Ok(array),
            None => Err(error!(UndimensionedArray)),
        }
    }
}
